use std::process::ExitCode;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use pushkind_store::db::{establish_connection_pool, run_migrations};
use pushkind_store::models::config::ServerConfig;
use pushkind_store::repository::DieselRepository;
use pushkind_store::routes::cart::{add_to_cart, show_cart, update_cart};
use pushkind_store::routes::checkout::{process_checkout, show_checkout};
use pushkind_store::routes::main::{index, search, show_catalog};
use pushkind_store::routes::orders::show_orders;
use pushkind_store::routes::products::{
    create_product, delete_product, edit_product, new_product, show_products, update_product,
};
use pushkind_store::services::seed::seed_demo_catalog;

/// Shortest secret `Key::derive_from` accepts.
const MIN_SECRET_LEN: usize = 32;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if server_config.secret.len() < MIN_SECRET_LEN {
        log::error!("APP_SECRET must be at least {MIN_SECRET_LEN} bytes long");
        return ExitCode::FAILURE;
    }
    let secret_key = Key::derive_from(server_config.secret.as_bytes());

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        return ExitCode::FAILURE;
    }

    let repo = DieselRepository::new(pool);

    if server_config.seed_demo_data {
        match seed_demo_catalog(&repo) {
            Ok(true) => log::info!("Seeded the demo catalog"),
            Ok(false) => log::info!("Catalog already has categories, skipping demo data"),
            Err(e) => {
                log::error!("Failed to seed the demo catalog: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            return ExitCode::FAILURE;
        }
    };

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    let repo = web::Data::new(repo);
    let tera = web::Data::new(tera);
    let server_config = web::Data::new(server_config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(tera.clone())
            .app_data(server_config.clone())
            .service(index)
            .service(show_catalog)
            .service(search)
            .service(show_cart)
            .service(add_to_cart)
            .service(update_cart)
            .service(show_checkout)
            .service(process_checkout)
            .service(show_orders)
            .service(show_products)
            .service(new_product)
            .service(create_product)
            .service(edit_product)
            .service(update_product)
            .service(delete_product)
    })
    .bind(bind_address);

    let server = match server {
        Ok(server) => server,
        Err(e) => {
            log::error!("Failed to bind server: {e}");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}
