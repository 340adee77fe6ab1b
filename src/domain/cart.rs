//! Cart lines and the stock rules applied when they change.

use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::types::{Money, ProductId, Quantity, StockQuantity, UserId};

/// Persisted cart record keyed by `(user_id, product_id)`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A cart record joined with the product as it is right now.
///
/// Price and stock are read at query time, never copied into the cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn subtotal(&self) -> Option<Money> {
        self.product.price.checked_mul(self.quantity)
    }

    pub fn exceeds_stock(&self) -> bool {
        !self.product.stock.covers(self.quantity)
    }
}

/// All lines of one user's cart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over all lines; `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.lines
            .iter()
            .try_fold(Money::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| i64::from(line.quantity.get()))
            .sum()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }
}

/// Why a cart change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRejection {
    /// Not enough stock; `available` is the current stock level.
    OutOfStock { available: StockQuantity },
}

/// Result of a cart write that reached the database.
#[derive(Debug, Clone, PartialEq)]
pub enum CartMutation {
    Saved(CartItem),
    Removed,
    Rejected(CartRejection),
}

/// New quantity for an "add to cart" of `delta` units.
pub fn check_add(
    existing: Option<Quantity>,
    delta: Quantity,
    stock: StockQuantity,
) -> Result<Quantity, CartRejection> {
    let rejection = CartRejection::OutOfStock { available: stock };
    if stock.get() <= 0 {
        return Err(rejection);
    }

    let current = existing.map_or(0, Quantity::get);
    let requested = current.checked_add(delta.get()).ok_or(rejection)?;
    if requested > stock.get() {
        return Err(rejection);
    }

    Quantity::new(requested).map_err(|_| rejection)
}

/// New quantity for an explicit quantity change; `Ok(None)` removes the line.
///
/// Only increases are checked against stock so a user can always shrink a
/// line that has become oversized.
pub fn check_set(
    current: Quantity,
    requested: i32,
    stock: StockQuantity,
) -> Result<Option<Quantity>, CartRejection> {
    if requested > current.get() && requested > stock.get() {
        return Err(CartRejection::OutOfStock { available: stock });
    }
    if requested <= 0 {
        return Ok(None);
    }
    Ok(Quantity::new(requested).ok())
}
