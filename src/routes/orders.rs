use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::orders::show_orders as show_orders_service;

#[get("/orders")]
pub async fn show_orders(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    match show_orders_service(&user, repo.get_ref()) {
        Ok(orders) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "orders",
                &server_config.login_url,
            );
            context.insert("orders", &orders);
            render_template(&tera, "orders/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(&server_config.login_url),
        Err(err) => {
            log::error!("Failed to render order history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
