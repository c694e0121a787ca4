//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from configuration files, `PROPERTIES_*` environment
//! variables and command-line flags.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/minicrm";
const DEFAULT_DATABASE: &str = "minicrm";

/// Configuration values for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROPERTIES")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding the `properties` collection.
    pub database: Option<String>,
    /// Serve from the in-memory repository instead of MongoDB.
    #[ortho_config(default = false)]
    pub memory_store: bool,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured connection string, falling back to a local server.
    pub fn mongodb_uri(&self) -> &str {
        self.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }

    /// Configured database name, falling back to `minicrm`.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }
}
