use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::checkout::{FieldErrors, ShippingForm, ShippingFormError, ShippingFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::checkout::{
    place_order as place_order_service, show_checkout as show_checkout_service,
};

/// Sends the user back to the cart with an explanation.
fn back_to_cart(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::EmptyCart => FlashMessage::info("Your cart is empty.").send(),
        ServiceError::InsufficientStock { product, available } => FlashMessage::error(format!(
            "Not enough stock for {product}: {available} available."
        ))
        .send(),
        err => {
            log::error!("Checkout failed: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }
    redirect("/cart")
}

fn render_checkout(
    form: &ShippingForm,
    errors: &FieldErrors,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match show_checkout_service(user, repo) {
        Ok((cart, total)) => {
            let mut context =
                base_context(flash_messages, Some(user), "checkout", &server_config.login_url);
            context.insert("lines", &cart.lines);
            context.insert("total", &total);
            context.insert("form", form);
            context.insert("errors", errors);
            render_template(tera, "checkout/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(&server_config.login_url),
        Err(err) => back_to_cart(err),
    }
}

#[get("/checkout")]
pub async fn show_checkout(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    render_checkout(
        &ShippingForm::default(),
        &FieldErrors::new(),
        &user,
        &flash_messages,
        repo.get_ref(),
        server_config.get_ref(),
        &tera,
    )
}

#[post("/checkout")]
pub async fn process_checkout(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ShippingForm>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    let payload: ShippingFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(ShippingFormError::Validation { form, errors }) => {
            return render_checkout(
                &form,
                &errors,
                &user,
                &flash_messages,
                repo.get_ref(),
                server_config.get_ref(),
                &tera,
            );
        }
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/checkout");
        }
    };

    match place_order_service(payload, &user, repo.get_ref(), Utc::now().naive_utc()) {
        Ok(_) => {
            FlashMessage::success("Thank you! Your order has been placed.").send();
            redirect("/orders")
        }
        Err(ServiceError::Unauthorized) => redirect(&server_config.login_url),
        Err(err) => back_to_cart(err),
    }
}
