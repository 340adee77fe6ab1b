pub mod cart_item;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod order;
pub mod product;
