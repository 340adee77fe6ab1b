use crate::STORE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::forms::products::ProductFormPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader, ProductWriter};

use super::{ServiceError, ServiceResult};

fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(STORE_ADMIN_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Products may only be attached to existing categories without children.
fn ensure_leaf_category<R>(product: &NewProduct, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    let leaves = repo.list_leaf_categories().map_err(|e| {
        log::error!("Failed to list leaf categories: {e}");
        ServiceError::Internal
    })?;

    if leaves.iter().any(|c| c.id == product.category_id) {
        Ok(())
    } else {
        Err(ServiceError::Form(
            "Choose a subcategory without children.".to_string(),
        ))
    }
}

/// All products with their category names, for the admin list.
pub fn show_products<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    ensure_admin(user)?;

    repo.list_products(ProductListQuery::default())
        .map_err(|e| {
            log::error!("Failed to list products: {e}");
            ServiceError::Internal
        })
}

/// Categories a product can be attached to.
pub fn show_product_categories<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    ensure_admin(user)?;

    repo.list_leaf_categories().map_err(|e| {
        log::error!("Failed to list leaf categories: {e}");
        ServiceError::Internal
    })
}

/// Loads a product for the edit form.
pub fn show_product<R>(product_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    ensure_admin(user)?;

    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_product<R>(
    payload: ProductFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Product>
where
    R: CategoryReader + ProductWriter,
{
    ensure_admin(user)?;
    ensure_leaf_category(&payload.product, repo)?;

    match repo.create_product(&payload.product) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.id, product.name);
            Ok(product)
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Overwrites every editable field of a product.
///
/// When nothing was updated the product is looked up again: if it vanished
/// meanwhile the result is [`ServiceError::NotFound`], otherwise the update
/// failed for an unknown reason and the result is [`ServiceError::Internal`].
pub fn update_product<R>(
    product_id: i32,
    payload: ProductFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + ProductReader + ProductWriter,
{
    ensure_admin(user)?;

    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    ensure_leaf_category(&payload.product, repo)?;

    match repo.update_product(product_id, &payload.product) {
        Ok(0) => match repo.get_product_by_id(product_id) {
            Ok(None) => Err(ServiceError::NotFound),
            Ok(Some(_)) => {
                log::error!("Product {product_id} exists but was not updated");
                Err(ServiceError::Internal)
            }
            Err(e) => {
                log::error!("Failed to re-check product after empty update: {e}");
                Err(ServiceError::Internal)
            }
        },
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_product<R>(product_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    ensure_admin(user)?;

    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_product(product_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Refused to delete product {product_id}: {e}");
            Err(ServiceError::Conflict(
                "The product appears in existing orders and cannot be deleted.".to_string(),
            ))
        }
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(ServiceError::Internal)
        }
    }
}
