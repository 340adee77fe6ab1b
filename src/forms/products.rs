use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{
    CategoryId, ImageUrl, Money, ProductName, StockQuantity, TypeConstraintError,
};

/// Create/edit form for a product.
///
/// Values are kept as submitted so the form can be re-rendered on error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ProductForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            category_id: product.category_id.get(),
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.as_str().to_string(),
            stock: product.stock.get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormPayload {
    pub product: NewProduct,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProductForm> for ProductFormPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            product: NewProduct {
                category_id: CategoryId::new(value.category_id)?,
                name: ProductName::new(value.name)?,
                description: value.description.trim().to_string(),
                price: Money::parse(&value.price)?,
                image_url: ImageUrl::new(value.image_url)?,
                stock: StockQuantity::new(value.stock)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            category_id: 3,
            name: " Teclado Mecánico RGB ".to_string(),
            description: "Luces personalizables".to_string(),
            price: "1800.00".to_string(),
            image_url: "https://example.com/teclado.png".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn valid_form_builds_new_product() {
        let payload = ProductFormPayload::try_from(form()).unwrap();

        assert_eq!(payload.product.name.as_str(), "Teclado Mecánico RGB");
        assert_eq!(payload.product.price.cents(), 180_000);
        assert_eq!(payload.product.stock.get(), 10);
        assert_eq!(payload.product.category_id.get(), 3);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut form = form();
        form.stock = -1;

        assert!(matches!(
            ProductFormPayload::try_from(form),
            Err(ProductFormError::Validation(_))
        ));
    }

    #[test]
    fn malformed_price_is_rejected() {
        let mut form = form();
        form.price = "12.345".to_string();

        assert!(matches!(
            ProductFormPayload::try_from(form),
            Err(ProductFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = form();
        form.name = "   ".to_string();

        assert!(matches!(
            ProductFormPayload::try_from(form),
            Err(ProductFormError::TypeConstraint(_))
        ));
    }
}
