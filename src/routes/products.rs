use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::categories::CategoryDto;
use crate::forms::products::{ProductForm, ProductFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    show_product as show_product_service,
    show_product_categories as show_product_categories_service,
    show_products as show_products_service, update_product as update_product_service,
};

/// Renders the create/edit form, re-filled with `form`.
#[allow(clippy::too_many_arguments)]
fn render_product_form(
    form: &ProductForm,
    form_error: Option<&str>,
    product_id: Option<i32>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let categories: Vec<CategoryDto> = match show_product_categories_service(user, repo) {
        Ok(categories) => categories.into_iter().map(CategoryDto::from).collect(),
        Err(ServiceError::Unauthorized) => return redirect("/"),
        Err(err) => {
            log::error!("Failed to load categories for product form: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        flash_messages,
        Some(user),
        "products",
        &server_config.login_url,
    );
    context.insert("form", form);
    context.insert("form_error", &form_error);
    context.insert("product_id", &product_id);
    context.insert("categories", &categories);
    render_template(tera, "products/form.html", &context)
}

#[get("/products")]
pub async fn show_products(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    match show_products_service(&user, repo.get_ref()) {
        Ok(products) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "products",
                &server_config.login_url,
            );
            context.insert("products", &products);
            render_template(&tera, "products/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You are not allowed to manage products.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to render products page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/new")]
pub async fn new_product(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    render_product_form(
        &ProductForm::default(),
        None,
        None,
        &user,
        &flash_messages,
        repo.get_ref(),
        server_config.get_ref(),
        &tera,
    )
}

#[post("/products/new")]
pub async fn create_product(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    let payload: ProductFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return render_product_form(
                &form,
                Some(&e.to_string()),
                None,
                &user,
                &flash_messages,
                repo.get_ref(),
                server_config.get_ref(),
                &tera,
            );
        }
    };

    match create_product_service(payload, &user, repo.get_ref()) {
        Ok(_) => {
            FlashMessage::success("Product created.").send();
            redirect("/products")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products/new")
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn edit_product(
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };
    let product_id = product_id.into_inner();

    match show_product_service(product_id, &user, repo.get_ref()) {
        Ok(product) => render_product_form(
            &ProductForm::from(&product),
            None,
            Some(product_id),
            &user,
            &flash_messages,
            repo.get_ref(),
            server_config.get_ref(),
            &tera,
        ),
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to render product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn update_product(
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };
    let product_id = product_id.into_inner();

    let payload: ProductFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return render_product_form(
                &form,
                Some(&e.to_string()),
                Some(product_id),
                &user,
                &flash_messages,
                repo.get_ref(),
                server_config.get_ref(),
                &tera,
            );
        }
    };

    match update_product_service(product_id, payload, &user, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Product updated.").send();
            redirect("/products")
        }
        Err(ServiceError::Unauthorized) => redirect("/"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("The product no longer exists.").send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/products/{product_id}/edit"))
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Some(user) = user else {
        return redirect(&server_config.login_url);
    };

    match delete_product_service(product_id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Product deleted.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/"),
        Err(ServiceError::NotFound) => FlashMessage::error("Product not found.").send(),
        Err(ServiceError::Conflict(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/products")
}
