//! Core library exports for the Pushkind storefront.
//!
//! With the `data` feature only the persistence layer (`domain`, `models`,
//! `schema`, `repository`, `db`) is built. The default `server` feature adds
//! forms, services and the Actix-web routes serving the catalog, cart,
//! checkout and order history.

/// Role required to create, edit and delete products.
pub const STORE_ADMIN_ROLE: &str = "store_admin";

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
