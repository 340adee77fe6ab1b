use crate::auth::AuthenticatedUser;
use crate::domain::types::UserId;

pub use errors::{ServiceError, ServiceResult};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod errors;
pub mod orders;
pub mod products;
pub mod seed;

/// Cart and order owner for the signed-in user.
fn owner(user: &AuthenticatedUser) -> ServiceResult<UserId> {
    user.user_id().map_err(|e| {
        log::warn!("Rejected identity without subject: {e}");
        ServiceError::Unauthorized
    })
}
