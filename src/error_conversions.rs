//! Conversions from form and value-object errors into [`ServiceError`].
//!
//! Forms live next to the HTTP layer while the domain must not depend on
//! service error types, so the glue sits here.

use crate::domain::types::TypeConstraintError;
use crate::forms::cart::CartFormError;
use crate::forms::checkout::ShippingFormError;
use crate::forms::products::ProductFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(val: ProductFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CartFormError> for ServiceError {
    fn from(val: CartFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ShippingFormError> for ServiceError {
    fn from(val: ShippingFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
