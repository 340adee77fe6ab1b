//! Validated domain entities and the pure rules that govern them.

pub mod cart;
pub mod category;
pub mod checkout;
pub mod order;
pub mod product;
pub mod types;
