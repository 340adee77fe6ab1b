use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::CartItem as DomainCartItem;
use crate::domain::types::{Quantity, TypeConstraintError, UserId};

/// Diesel model representing the `cart_items` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub user_id: String,
    pub product_id: i32,
    pub quantity: i32,
    pub position: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem<'a> {
    pub user_id: &'a str,
    pub product_id: i32,
    pub quantity: i32,
    /// One past the highest position in the user's cart.
    pub position: i32,
}

impl TryFrom<CartItem> for DomainCartItem {
    type Error = TypeConstraintError;

    fn try_from(item: CartItem) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(item.user_id)?,
            product_id: item.product_id.try_into()?,
            quantity: Quantity::new(item.quantity)?,
        })
    }
}
