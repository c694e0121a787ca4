//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together with
//! the envelope wrappers from [`crate::inbound::http::schemas`]. Request types
//! are the same structs the handlers deserialise, so the document describes
//! exactly what the boundary accepts.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::health::{DatabaseHealth, HealthReport};
use crate::inbound::http::property_dto::{
    AmountDto, AmountResponse, LocationStatsResponse, PropertyRequest, PropertyResponse,
    PropertyStatusDto, StatisticsResponse, StatusCountResponse,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, HealthEnvelopeSchema, PageMetaSchema, PropertyEnvelopeSchema,
    PropertyListEnvelopeSchema, StatisticsEnvelopeSchema,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MiniCRM property API",
        description = "Create, list, replace and delete property listings and read collection statistics.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::properties::list_properties,
        crate::inbound::http::properties::create_property,
        crate::inbound::http::properties::property_statistics,
        crate::inbound::http::properties::replace_property,
        crate::inbound::http::properties::delete_property,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        PropertyRequest,
        AmountDto,
        PropertyStatusDto,
        PropertyResponse,
        AmountResponse,
        StatisticsResponse,
        StatusCountResponse,
        LocationStatsResponse,
        HealthReport,
        DatabaseHealth,
        PageMetaSchema,
        PropertyEnvelopeSchema,
        PropertyListEnvelopeSchema,
        StatisticsEnvelopeSchema,
        HealthEnvelopeSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "properties", description = "Property listing operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
