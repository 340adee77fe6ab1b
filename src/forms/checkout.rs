use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::ShippingInfo;
use crate::domain::types::{
    PostalCode, ShippingAddress, ShippingCity, ShippingName, TypeConstraintError,
};

/// Messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Shipping details entered on the checkout page.
///
/// Fields left out of the submission read as blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ShippingForm {
    #[validate(length(min = 1, max = 100, message = "Enter the recipient's name."))]
    pub shipping_name: String,
    #[validate(length(min = 1, max = 200, message = "Enter the street address."))]
    pub shipping_address: String,
    #[validate(length(min = 1, max = 100, message = "Enter the city."))]
    pub shipping_city: String,
    #[validate(length(min = 1, max = 20, message = "Enter the postal code."))]
    pub shipping_postal_code: String,
}

impl ShippingForm {
    fn trimmed(self) -> Self {
        Self {
            shipping_name: self.shipping_name.trim().to_string(),
            shipping_address: self.shipping_address.trim().to_string(),
            shipping_city: self.shipping_city.trim().to_string(),
            shipping_postal_code: self.shipping_postal_code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingFormPayload {
    pub shipping: ShippingInfo,
    /// The trimmed form, for re-rendering.
    pub form: ShippingForm,
}

#[derive(Debug, Error)]
pub enum ShippingFormError {
    #[error("Shipping details are incomplete")]
    Validation { form: ShippingForm, errors: FieldErrors },
    #[error("Shipping form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for ShippingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let message = errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid value.".to_string());
            (field.to_string(), message)
        })
        .collect()
}

impl TryFrom<ShippingForm> for ShippingFormPayload {
    type Error = ShippingFormError;

    fn try_from(value: ShippingForm) -> Result<Self, Self::Error> {
        let form = value.trimmed();
        if let Err(errors) = form.validate() {
            return Err(ShippingFormError::Validation {
                errors: field_errors(&errors),
                form,
            });
        }

        let shipping = ShippingInfo {
            name: ShippingName::new(form.shipping_name.as_str())?,
            address: ShippingAddress::new(form.shipping_address.as_str())?,
            city: ShippingCity::new(form.shipping_city.as_str())?,
            postal_code: PostalCode::new(form.shipping_postal_code.as_str())?,
        };

        Ok(Self { shipping, form })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ShippingForm {
        ShippingForm {
            shipping_name: "Ana López".to_string(),
            shipping_address: "Av. Juárez 100".to_string(),
            shipping_city: "Guadalajara".to_string(),
            shipping_postal_code: "44100".to_string(),
        }
    }

    #[test]
    fn complete_form_builds_shipping_info() {
        let payload = ShippingFormPayload::try_from(form()).unwrap();

        assert_eq!(payload.shipping.city.as_str(), "Guadalajara");
        assert_eq!(payload.shipping.postal_code.as_str(), "44100");
    }

    #[test]
    fn blank_fields_are_reported_per_field() {
        let mut form = form();
        form.shipping_city = "   ".to_string();
        form.shipping_postal_code = String::new();

        let Err(ShippingFormError::Validation { errors, form }) =
            ShippingFormPayload::try_from(form)
        else {
            panic!("expected validation error");
        };

        assert_eq!(errors.len(), 2);
        assert_eq!(errors["shipping_city"], "Enter the city.");
        assert_eq!(errors["shipping_postal_code"], "Enter the postal code.");
        assert_eq!(form.shipping_name, "Ana López");
    }

    #[test]
    fn missing_fields_are_reported_like_blank_ones() {
        let form: ShippingForm =
            serde_json::from_str(r#"{"shipping_name": "Ana López"}"#).unwrap();

        let Err(ShippingFormError::Validation { errors, .. }) =
            ShippingFormPayload::try_from(form)
        else {
            panic!("expected validation error");
        };

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["shipping_address"], "Enter the street address.");
        assert_eq!(errors["shipping_city"], "Enter the city.");
        assert_eq!(errors["shipping_postal_code"], "Enter the postal code.");
    }
}
