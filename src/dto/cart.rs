//! JSON bodies returned by the cart endpoints.

use serde::Serialize;

use crate::services::cart::CartUpdate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub message: String,
}

impl CartResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Result of a quantity change, with figures for updating the page in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateResponse {
    pub success: bool,
    pub message: String,
    pub was_removed: bool,
    pub new_subtotal: String,
    pub new_total: String,
    pub cart_item_count: i64,
}

impl From<CartUpdate> for CartUpdateResponse {
    fn from(update: CartUpdate) -> Self {
        let message = if update.was_removed {
            "Product removed"
        } else {
            "Quantity updated"
        };
        Self {
            success: true,
            message: message.to_string(),
            was_removed: update.was_removed,
            new_subtotal: update.line_subtotal.to_string(),
            new_total: update.total.to_string(),
            cart_item_count: update.item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Money;

    #[test]
    fn update_response_uses_camel_case_keys() {
        let response = CartUpdateResponse::from(CartUpdate {
            was_removed: false,
            line_subtotal: Money::from_cents(20_000).unwrap(),
            total: Money::from_cents(20_250).unwrap(),
            item_count: 3,
        });

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "success": true,
                "message": "Quantity updated",
                "wasRemoved": false,
                "newSubtotal": "200.00",
                "newTotal": "202.50",
                "cartItemCount": 3,
            })
        );
    }
}
