use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    CategoryName, ImageUrl, Money, ProductName, StockQuantity, TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub stock: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Product`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub stock: i32,
}

impl Product {
    /// Converts the row into a domain product carrying its category name.
    pub fn into_domain(
        self,
        category: Option<String>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        Ok(DomainProduct {
            id: self.id.try_into()?,
            category_id: self.category_id.try_into()?,
            category: category.map(CategoryName::new).transpose()?,
            name: ProductName::new(self.name)?,
            description: self.description,
            price: Money::from_cents(self.price_cents)?,
            image_url: ImageUrl::new(self.image_url)?,
            stock: StockQuantity::new(self.stock)?,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        product.into_domain(None)
    }
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price_cents: product.price.cents(),
            image_url: product.image_url.as_str().to_string(),
            stock: product.stock.get(),
        }
    }
}
