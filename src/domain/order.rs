use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    Money, OrderDetailId, OrderId, PostalCode, ProductId, ProductName, Quantity, ShippingAddress,
    ShippingCity, ShippingName, UserId,
};

/// Where an order is shipped. Every field is required.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShippingInfo {
    pub name: ShippingName,
    pub address: ShippingAddress,
    pub city: ShippingCity,
    pub postal_code: PostalCode,
}

/// One purchased product with the unit price captured at checkout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOrderDetail {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub price: Money,
}

/// An order ready to be persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub created_at: NaiveDateTime,
    pub total: Money,
    pub shipping: ShippingInfo,
    pub details: Vec<NewOrderDetail>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderDetail {
    pub id: OrderDetailId,
    pub product_id: ProductId,
    pub product_name: ProductName,
    pub quantity: Quantity,
    pub price: Money,
}

impl OrderDetail {
    pub fn subtotal(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

/// A committed order. Never modified after checkout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: NaiveDateTime,
    pub total: Money,
    pub shipping: ShippingInfo,
    pub details: Vec<OrderDetail>,
}
