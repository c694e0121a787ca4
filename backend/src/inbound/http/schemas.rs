//! OpenAPI schema definitions for envelopes and domain types.
//!
//! Domain types and the generic response envelope do not derive `ToSchema`.
//! The wrappers here mirror their serialised shape so the generated document
//! matches what handlers emit.

use utoipa::ToSchema;

use crate::inbound::http::health::HealthReport;
use crate::inbound::http::property_dto::{PropertyResponse, StatisticsResponse};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The addressed record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store rejected or could not complete a write.
    #[schema(rename = "unprocessable_entity")]
    UnprocessableEntity,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Envelope returned for every failed request.
#[derive(ToSchema)]
#[schema(as = ErrorResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `fail`.
    #[schema(example = "fail")]
    status: String,
    /// Human-readable message.
    #[schema(example = "Property not found")]
    message: String,
    /// HTTP status code.
    #[schema(example = 404)]
    status_code: u16,
    /// Stable machine-readable code.
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level validation information.
    #[schema(value_type = Option<Object>, example = json!({"field": "title", "code": "length_out_of_range"}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`pagination::PageMeta`].
#[derive(ToSchema)]
#[schema(as = PageMeta, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetaSchema {
    /// Size of the filtered set.
    total_items: u64,
    /// Records on this page.
    item_count: u64,
    /// Requested page size.
    items_per_page: u32,
    /// `ceil(totalItems / itemsPerPage)`.
    total_pages: u64,
    /// Page served.
    current_page: u32,
}

/// Envelope around a single property.
#[derive(ToSchema)]
#[schema(as = PropertyEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PropertyEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    #[schema(example = "Property created successfully")]
    message: String,
    #[schema(example = 201)]
    status_code: u16,
    data: PropertyResponse,
}

/// Envelope around one listing page.
#[derive(ToSchema)]
#[schema(as = PropertyListEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PropertyListEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    #[schema(example = "Properties fetched successfully")]
    message: String,
    #[schema(example = 200)]
    status_code: u16,
    data: Vec<PropertyResponse>,
    meta: PageMetaSchema,
}

/// Envelope around collection statistics.
#[derive(ToSchema)]
#[schema(as = StatisticsEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StatisticsEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    #[schema(example = "Property Statistics")]
    message: String,
    #[schema(example = 200)]
    status_code: u16,
    data: StatisticsResponse,
}

/// Envelope around the health report.
#[derive(ToSchema)]
#[schema(as = HealthEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    #[schema(example = "Service is healthy")]
    message: String,
    #[schema(example = 200)]
    status_code: u16,
    data: HealthReport,
}
