use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::catalog::{
    search_products as search_products_service, show_category_tree as show_category_tree_service,
    show_featured as show_featured_service,
};

#[derive(Deserialize)]
struct SearchQueryParams {
    query: Option<String>,
}

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_featured_service(server_config.featured_count, repo.get_ref()) {
        Ok(products) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.login_url,
            );
            context.insert("products", &products);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/catalog/{root}")]
pub async fn show_catalog(
    root: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let root = root.into_inner();
    match show_category_tree_service(&root, repo.get_ref()) {
        Ok(tree) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "catalog",
                &server_config.login_url,
            );
            context.insert("root_name", &root);
            context.insert("tree", &tree);
            render_template(&tera, "main/catalog.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render catalog page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/search")]
pub async fn search(
    params: web::Query<SearchQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = params.into_inner().query.unwrap_or_default();
    match search_products_service(&query, repo.get_ref()) {
        Ok(products) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "search",
                &server_config.login_url,
            );
            context.insert("query", &query);
            context.insert("products", &products);
            render_template(&tera, "main/search.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render search results: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
