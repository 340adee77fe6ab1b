//! Checkout: cart summary before payment and order placement.

use chrono::NaiveDateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::cart::Cart;
use crate::domain::checkout::{CheckoutOutcome, CheckoutRejection, validate_stock};
use crate::domain::types::{Money, OrderId};
use crate::forms::checkout::ShippingFormPayload;
use crate::repository::{CartReader, CheckoutWriter};

use super::{ServiceError, ServiceResult, owner};

fn rejection_error(rejection: CheckoutRejection) -> ServiceError {
    match rejection {
        CheckoutRejection::EmptyCart => ServiceError::EmptyCart,
        CheckoutRejection::InsufficientStock {
            product_name,
            available,
        } => ServiceError::InsufficientStock {
            product: product_name.into_inner(),
            available: available.get(),
        },
        CheckoutRejection::AmountOverflow => {
            log::error!("Order total overflowed");
            ServiceError::Internal
        }
    }
}

/// The cart as shown next to the shipping form, with its total.
///
/// Fails with [`ServiceError::EmptyCart`] or
/// [`ServiceError::InsufficientStock`] when the cart cannot be checked out
/// as it stands.
pub fn show_checkout<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<(Cart, Money)>
where
    R: CartReader,
{
    let user_id = owner(user)?;

    let cart = repo.list_cart_lines(&user_id).map(Cart::new).map_err(|e| {
        log::error!("Failed to list cart lines: {e}");
        ServiceError::Internal
    })?;

    validate_stock(&cart.lines).map_err(rejection_error)?;

    let total = cart
        .total()
        .ok_or(CheckoutRejection::AmountOverflow)
        .map_err(rejection_error)?;

    Ok((cart, total))
}

/// Places an order for the whole cart.
///
/// Stock is checked and decremented, the order is written and the cart is
/// cleared in a single transaction; on any rejection nothing changes.
pub fn place_order<R>(
    payload: ShippingFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    placed_at: NaiveDateTime,
) -> ServiceResult<OrderId>
where
    R: CheckoutWriter,
{
    let user_id = owner(user)?;

    match repo.commit_checkout(&user_id, &payload.shipping, placed_at) {
        Ok(CheckoutOutcome::Placed(order_id)) => {
            log::info!("Order {order_id} placed by {user_id}");
            Ok(order_id)
        }
        Ok(CheckoutOutcome::Rejected(rejection)) => Err(rejection_error(rejection)),
        Err(e) => {
            log::error!("Failed to commit checkout: {e}");
            Err(ServiceError::Internal)
        }
    }
}
