use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A cart change asked for more units than are in stock.
    #[error("only {available} units available")]
    OutOfStock { available: i32 },
    /// A checkout line asked for more units than are in stock.
    #[error("not enough stock for {product}: {available} available")]
    InsufficientStock { product: String, available: i32 },
    /// Checkout was attempted with an empty cart.
    #[error("the cart is empty")]
    EmptyCart,
    /// Submitted data was rejected.
    #[error("{0}")]
    Form(String),
    /// The operation conflicts with existing data.
    #[error("{0}")]
    Conflict(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
