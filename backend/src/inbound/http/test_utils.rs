//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};

use crate::Trace;
use crate::domain::ports::{FixtureStoreHealth, MockPropertyCommand, MockPropertyQuery};
use crate::inbound::http::error::route_not_found;
use crate::inbound::http::state::HttpState;

/// Build handler state from mocked driving ports.
pub(crate) fn mock_state(query: MockPropertyQuery, command: MockPropertyCommand) -> HttpState {
    HttpState::new(Arc::new(query), Arc::new(command), Arc::new(FixtureStoreHealth))
}

/// Initialise the full routing table over `state`, wrapped in [`Trace`].
pub(crate) async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(super::configure)
            .default_service(web::to(route_not_found)),
    )
    .await
}
