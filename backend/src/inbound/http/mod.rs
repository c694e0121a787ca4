//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod envelope;
pub mod error;
pub mod health;
pub mod properties;
pub mod property_dto;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register extractor configuration and every endpoint.
///
/// The caller adds middleware and the unmatched-route fallback
/// ([`error::route_not_found`]) on the enclosing `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(health::health)
        .service(properties::list_properties)
        .service(properties::create_property)
        .service(properties::property_statistics)
        .service(properties::replace_property)
        .service(properties::delete_property);
}
