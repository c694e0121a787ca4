//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PropertyCommand, PropertyQuery, StoreHealth};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Listing and statistics reads.
    pub properties: Arc<dyn PropertyQuery>,
    /// Create, replace and delete.
    pub property_commands: Arc<dyn PropertyCommand>,
    /// Store probe for `/health`.
    pub store_health: Arc<dyn StoreHealth>,
    /// Service name reported by `/health`.
    pub service_name: String,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::PropertyService;
    /// use backend::domain::ports::FixtureStoreHealth;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryPropertyRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(PropertyService::new(
    ///     Arc::new(InMemoryPropertyRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service, Arc::new(FixtureStoreHealth));
    /// assert_eq!(state.service_name, "MiniCRM API");
    /// ```
    pub fn new(
        properties: Arc<dyn PropertyQuery>,
        property_commands: Arc<dyn PropertyCommand>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            properties,
            property_commands,
            store_health,
            service_name: "MiniCRM API".to_owned(),
        }
    }
}
