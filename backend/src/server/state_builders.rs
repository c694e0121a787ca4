//! Builders for HTTP state over the configured repository.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use backend::domain::PropertyService;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryPropertyRepository;

use super::ServerConfig;

/// Wire [`PropertyService`] over MongoDB when a store is configured,
/// otherwise over a fresh in-memory repository.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match &config.store {
        Some(store) => {
            let service = Arc::new(PropertyService::new(
                Arc::new(store.property_repository()),
                clock,
            ));
            HttpState::new(service.clone(), service, Arc::new(store.clone()))
        }
        None => {
            warn!("serving from the in-memory repository; data is lost on exit");
            let repo = Arc::new(InMemoryPropertyRepository::default());
            let service = Arc::new(PropertyService::new(repo.clone(), clock));
            HttpState::new(service.clone(), service, repo)
        }
    };
    web::Data::new(state)
}
