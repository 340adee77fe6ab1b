pub mod cart;
pub mod categories;
