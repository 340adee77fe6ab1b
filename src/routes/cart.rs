use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::cart::{CartResponse, CartUpdateResponse};
use crate::forms::cart::{
    AddToCartForm, AddToCartFormPayload, UpdateCartForm, UpdateCartFormPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::cart::{
    add_to_cart as add_to_cart_service, show_cart as show_cart_service,
    update_cart as update_cart_service,
};

/// JSON body for a cart request that failed.
fn cart_error(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(CartResponse::error("Sign in to use the cart."))
        }
        ServiceError::NotFound => {
            HttpResponse::Ok().json(CartResponse::error("Product not found in the catalog or cart."))
        }
        ServiceError::OutOfStock { available: 0 } => {
            HttpResponse::Ok().json(CartResponse::error("Sorry, this product is sold out."))
        }
        ServiceError::OutOfStock { available } => HttpResponse::Ok().json(CartResponse::error(
            format!("Only {available} units available."),
        )),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(CartResponse::error(message)),
        err => {
            log::error!("Failed to change cart: {err}");
            HttpResponse::InternalServerError().json(CartResponse::error("Something went wrong."))
        }
    }
}

#[get("/cart")]
pub async fn show_cart(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    match show_cart_service(&user, repo.get_ref()) {
        Ok(cart) => {
            let Some(total) = cart.total() else {
                log::error!("Cart total overflowed");
                return HttpResponse::InternalServerError().finish();
            };
            let subtotals: Vec<String> = cart
                .lines
                .iter()
                .map(|line| line.subtotal().map(|s| s.to_string()).unwrap_or_default())
                .collect();
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "cart",
                &server_config.login_url,
            );
            context.insert("lines", &cart.lines);
            context.insert("subtotals", &subtotals);
            context.insert("total", &total);
            context.insert("item_count", &cart.item_count());
            render_template(&tera, "cart/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(&server_config.login_url),
        Err(err) => {
            log::error!("Failed to render cart page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/add")]
pub async fn add_to_cart(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let Some(user) = user else {
        return cart_error(ServiceError::Unauthorized);
    };

    let payload: AddToCartFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return cart_error(ServiceError::from(e)),
    };

    match add_to_cart_service(payload, &user, repo.get_ref()) {
        Ok(_) => HttpResponse::Ok().json(CartResponse::ok("Product added to the cart!")),
        Err(err) => cart_error(err),
    }
}

#[post("/cart/update")]
pub async fn update_cart(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateCartForm>,
) -> impl Responder {
    let Some(user) = user else {
        return cart_error(ServiceError::Unauthorized);
    };

    let payload: UpdateCartFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return cart_error(ServiceError::from(e)),
    };

    match update_cart_service(payload, &user, repo.get_ref()) {
        Ok(update) => HttpResponse::Ok().json(CartUpdateResponse::from(update)),
        Err(err) => cart_error(err),
    }
}
