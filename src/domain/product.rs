use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, ImageUrl, Money, ProductId, ProductName, StockQuantity,
};

/// A sellable catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    /// Name of the category resolved via `category_id`, when loaded.
    pub category: Option<CategoryName>,
    pub name: ProductName,
    pub description: String,
    pub price: Money,
    pub image_url: ImageUrl,
    pub stock: StockQuantity,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Case-insensitive substring match over name and description.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self.description.to_lowercase().contains(needle_lowercase)
    }
}

/// Information required to create or overwrite a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: ProductName,
    pub description: String,
    pub price: Money,
    pub image_url: ImageUrl,
    pub stock: StockQuantity,
}
