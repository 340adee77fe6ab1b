//! Runtime configuration for the storefront server.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings shared with every handler through `web::Data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind the HTTP server to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Key shared with the identity provider for signing session cookies.
    pub secret: String,
    /// Where unauthenticated users are sent to sign in.
    pub login_url: String,
    /// Glob passed to tera when loading templates.
    pub templates_dir: String,
    /// Number of products shown on the home page.
    pub featured_count: usize,
    /// Insert the demo catalog when the database has no categories.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/{APP_ENV}.yaml`, then `APP_*`
    /// environment variables, each layer overriding the previous one.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "app.db")?
            .set_default("secret", "")?
            .set_default("login_url", "/auth/signin")?
            .set_default("templates_dir", "templates/**/*")?
            .set_default("featured_count", 4)?
            .set_default("seed_demo_data", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
