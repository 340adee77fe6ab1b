use serde::Serialize;

use crate::domain::category::Category;

/// Option entry of the category select on the product form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
