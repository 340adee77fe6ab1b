use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{ProductId, Quantity, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartForm {
    #[serde(alias = "productId")]
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddToCartFormPayload {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartForm {
    #[serde(alias = "productId")]
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Zero or less removes the line.
    #[serde(alias = "newQuantity")]
    pub new_quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateCartFormPayload {
    pub product_id: ProductId,
    pub quantity: i32,
}

#[derive(Debug, Error)]
pub enum CartFormError {
    #[error("Cart form validation failed: {0}")]
    Validation(String),
    #[error("Cart form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CartFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CartFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddToCartForm> for AddToCartFormPayload {
    type Error = CartFormError;

    fn try_from(value: AddToCartForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            product_id: ProductId::new(value.product_id)?,
            quantity: Quantity::new(value.quantity.unwrap_or(1))?,
        })
    }
}

impl TryFrom<UpdateCartForm> for UpdateCartFormPayload {
    type Error = CartFormError;

    fn try_from(value: UpdateCartForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            product_id: ProductId::new(value.product_id)?,
            quantity: value.new_quantity,
        })
    }
}
