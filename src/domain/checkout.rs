//! Validation and order construction for checkout.
//!
//! These functions are pure: the repository calls them inside the checkout
//! transaction with the cart it just loaded, and unit tests call them
//! directly.

use chrono::NaiveDateTime;

use crate::domain::cart::CartLine;
use crate::domain::order::{NewOrder, NewOrderDetail, ShippingInfo};
use crate::domain::types::{Money, OrderId, ProductName, StockQuantity, UserId};

/// Why a checkout was refused without writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRejection {
    /// The cart has no lines.
    EmptyCart,
    /// A line asks for more units than the product has in stock.
    InsufficientStock {
        product_name: ProductName,
        available: StockQuantity,
    },
    /// The order total does not fit the currency representation.
    AmountOverflow,
}

/// Result of a checkout attempt that reached the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Placed(OrderId),
    Rejected(CheckoutRejection),
}

/// Fails on the first line, in cart order, whose quantity exceeds stock.
pub fn validate_stock(lines: &[CartLine]) -> Result<(), CheckoutRejection> {
    if lines.is_empty() {
        return Err(CheckoutRejection::EmptyCart);
    }
    match lines.iter().find(|line| line.exceeds_stock()) {
        Some(line) => Err(CheckoutRejection::InsufficientStock {
            product_name: line.product.name.clone(),
            available: line.product.stock,
        }),
        None => Ok(()),
    }
}

/// Builds the order for `lines`, capturing each product's current price.
pub fn plan_order(
    user_id: &UserId,
    lines: &[CartLine],
    shipping: ShippingInfo,
    placed_at: NaiveDateTime,
) -> Result<NewOrder, CheckoutRejection> {
    validate_stock(lines)?;

    let mut total = Money::ZERO;
    let mut details = Vec::with_capacity(lines.len());
    for line in lines {
        let subtotal = line.subtotal().ok_or(CheckoutRejection::AmountOverflow)?;
        total = total
            .checked_add(subtotal)
            .ok_or(CheckoutRejection::AmountOverflow)?;
        details.push(NewOrderDetail {
            product_id: line.product.id,
            quantity: line.quantity,
            price: line.product.price,
        });
    }

    Ok(NewOrder {
        user_id: user_id.clone(),
        created_at: placed_at,
        total,
        shipping,
        details,
    })
}
