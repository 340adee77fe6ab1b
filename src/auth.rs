//! The signed-in user as provided by the external identity service.
//!
//! The identity service stores a JSON-encoded [`AuthenticatedUser`] as the
//! `actix-identity` id inside the shared session cookie. This crate only
//! reads it.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Stable subject identifier; the user id for carts and orders.
    pub sub: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        UserId::new(self.sub.as_str())
    }

    fn from_request_identity(req: &HttpRequest) -> Result<Self, actix_web::Error> {
        let identity = req
            .get_identity()
            .map_err(|_| ErrorUnauthorized("not signed in"))?;
        let id = identity
            .id()
            .map_err(|_| ErrorUnauthorized("not signed in"))?;

        serde_json::from_str(&id).map_err(|e| {
            log::warn!("Failed to decode identity payload: {e}");
            ErrorUnauthorized("invalid identity")
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_identity(req))
    }
}

/// Whether `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_identity_payload() {
        let user: AuthenticatedUser = serde_json::from_str(
            r#"{"sub":"u-1","email":"ana@example.com","name":"Ana","roles":["store_admin"]}"#,
        )
        .unwrap();

        assert_eq!(user.user_id().unwrap().as_str(), "u-1");
        assert!(check_role("store_admin", &user.roles));
        assert!(!check_role("other", &user.roles));
    }

    #[test]
    fn roles_default_to_empty() {
        let user: AuthenticatedUser =
            serde_json::from_str(r#"{"sub":"u-2","email":"b@example.com","name":"B"}"#).unwrap();

        assert!(user.roles.is_empty());
    }

    #[test]
    fn blank_subject_is_not_a_user_id() {
        let user = AuthenticatedUser {
            sub: "  ".to_string(),
            ..AuthenticatedUser::default()
        };

        assert!(user.user_id().is_err());
    }
}
