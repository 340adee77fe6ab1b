use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderDetail as DomainNewOrderDetail, Order as DomainOrder,
    OrderDetail as DomainOrderDetail, ShippingInfo,
};
use crate::domain::types::{
    Money, PostalCode, ProductName, Quantity, ShippingAddress, ShippingCity, ShippingName,
    TypeConstraintError, UserId,
};

/// Diesel model representing the `orders` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub total_cents: i64,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: &'a str,
    pub created_at: NaiveDateTime,
    pub total_cents: i64,
    pub shipping_name: &'a str,
    pub shipping_address: &'a str,
    pub shipping_city: &'a str,
    pub shipping_postal_code: &'a str,
}

/// Diesel model representing the `order_details` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::order_details)]
pub struct OrderDetail {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_cents: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::order_details)]
pub struct NewOrderDetail {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_cents: i64,
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            user_id: order.user_id.as_str(),
            created_at: order.created_at,
            total_cents: order.total.cents(),
            shipping_name: order.shipping.name.as_str(),
            shipping_address: order.shipping.address.as_str(),
            shipping_city: order.shipping.city.as_str(),
            shipping_postal_code: order.shipping.postal_code.as_str(),
        }
    }
}

impl NewOrderDetail {
    pub fn new(order_id: i32, detail: &DomainNewOrderDetail) -> Self {
        Self {
            order_id,
            product_id: detail.product_id.get(),
            quantity: detail.quantity.get(),
            price_cents: detail.price.cents(),
        }
    }
}

impl OrderDetail {
    pub fn into_domain(self, product_name: String) -> Result<DomainOrderDetail, TypeConstraintError> {
        Ok(DomainOrderDetail {
            id: self.id.try_into()?,
            product_id: self.product_id.try_into()?,
            product_name: ProductName::new(product_name)?,
            quantity: Quantity::new(self.quantity)?,
            price: Money::from_cents(self.price_cents)?,
        })
    }
}

impl Order {
    pub fn into_domain(
        self,
        details: Vec<DomainOrderDetail>,
    ) -> Result<DomainOrder, TypeConstraintError> {
        Ok(DomainOrder {
            id: self.id.try_into()?,
            user_id: UserId::new(self.user_id)?,
            created_at: self.created_at,
            total: Money::from_cents(self.total_cents)?,
            shipping: ShippingInfo {
                name: ShippingName::new(self.shipping_name)?,
                address: ShippingAddress::new(self.shipping_address)?,
                city: ShippingCity::new(self.shipping_city)?,
                postal_code: PostalCode::new(self.shipping_postal_code)?,
            },
            details,
        })
    }
}
