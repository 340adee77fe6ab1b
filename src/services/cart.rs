//! Per-user shopping cart.

use crate::auth::AuthenticatedUser;
use crate::domain::cart::{Cart, CartItem, CartMutation, CartRejection};
use crate::domain::types::Money;
use crate::forms::cart::{AddToCartFormPayload, UpdateCartFormPayload};
use crate::repository::errors::RepositoryError;
use crate::repository::{CartReader, CartWriter};

use super::{ServiceError, ServiceResult, owner};

/// Cart state after a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub was_removed: bool,
    /// Subtotal of the changed line; zero when it was removed.
    pub line_subtotal: Money,
    pub total: Money,
    pub item_count: i64,
}

fn rejection_error(rejection: CartRejection) -> ServiceError {
    match rejection {
        CartRejection::OutOfStock { available } => ServiceError::OutOfStock {
            available: available.get(),
        },
    }
}

fn load_cart<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader,
{
    let user_id = owner(user)?;
    repo.list_cart_lines(&user_id).map(Cart::new).map_err(|e| {
        log::error!("Failed to list cart lines: {e}");
        ServiceError::Internal
    })
}

/// The signed-in user's cart with current product data.
pub fn show_cart<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader,
{
    load_cart(user, repo)
}

pub fn add_to_cart<R>(
    payload: AddToCartFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CartItem>
where
    R: CartWriter,
{
    let user_id = owner(user)?;

    match repo.add_to_cart(&user_id, payload.product_id, payload.quantity) {
        Ok(CartMutation::Saved(item)) => Ok(item),
        Ok(CartMutation::Rejected(rejection)) => Err(rejection_error(rejection)),
        Ok(CartMutation::Removed) => {
            log::error!("Adding to cart removed a line");
            Err(ServiceError::Internal)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to add to cart: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Changes the quantity of a cart line and returns the recomputed cart
/// figures.
pub fn update_cart<R>(
    payload: UpdateCartFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CartUpdate>
where
    R: CartReader + CartWriter,
{
    let user_id = owner(user)?;

    let was_removed =
        match repo.set_cart_quantity(&user_id, payload.product_id, payload.quantity) {
            Ok(CartMutation::Saved(_)) => false,
            Ok(CartMutation::Removed) => true,
            Ok(CartMutation::Rejected(rejection)) => return Err(rejection_error(rejection)),
            Err(RepositoryError::NotFound) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to update cart quantity: {e}");
                return Err(ServiceError::Internal);
            }
        };

    let cart = load_cart(user, repo)?;
    let line_subtotal = match cart.line(payload.product_id) {
        Some(line) => line.subtotal(),
        None => Some(Money::ZERO),
    };
    let (Some(line_subtotal), Some(total)) = (line_subtotal, cart.total()) else {
        log::error!("Cart total overflowed for user {user_id}");
        return Err(ServiceError::Internal);
    };

    Ok(CartUpdate {
        was_removed,
        line_subtotal,
        total,
        item_count: cart.item_count(),
    })
}
