use crate::auth::AuthenticatedUser;
use crate::domain::order::Order;
use crate::repository::OrderReader;

use super::{ServiceError, ServiceResult, owner};

/// Order history of the signed-in user, newest first.
pub fn show_orders<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Order>>
where
    R: OrderReader,
{
    let user_id = owner(user)?;

    repo.list_orders(&user_id).map_err(|e| {
        log::error!("Failed to list orders: {e}");
        ServiceError::Internal
    })
}
