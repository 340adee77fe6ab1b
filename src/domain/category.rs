use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{
    CategoryId, CategoryName, ImageUrl, Money, ProductName, StockQuantity,
};

/// Node of the category adjacency list.
///
/// Children are never embedded; they are looked up by `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub parent_id: Option<CategoryId>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub parent_id: Option<CategoryId>,
}

/// A direct child of a root category together with its products.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBranch {
    pub category: Category,
    pub products: Vec<Product>,
}

/// A root category and its direct children.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTree {
    pub root: Category,
    pub branches: Vec<CategoryBranch>,
}

/// Starter catalog inserted as a whole into an empty database.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSeed {
    pub roots: Vec<SeedRoot>,
    pub products: Vec<SeedProduct>,
}

/// Root category with the names of its direct children.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRoot {
    pub name: CategoryName,
    pub children: Vec<CategoryName>,
}

/// Product attached by name to one of the seeded child categories.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedProduct {
    pub category: CategoryName,
    pub name: ProductName,
    pub description: String,
    pub price: Money,
    pub image_url: ImageUrl,
    pub stock: StockQuantity,
}
