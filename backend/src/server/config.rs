//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::outbound::persistence::MongoStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Option<MongoStore>,
}

impl ServerConfig {
    /// Construct a configuration that serves from the in-memory repository.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            store: None,
        }
    }

    /// Attach a connected MongoDB store.
    ///
    /// When provided, the server persists properties in MongoDB and probes it
    /// from `/health`.
    #[must_use]
    pub fn with_store(mut self, store: MongoStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
