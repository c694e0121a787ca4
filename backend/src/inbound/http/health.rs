//! Health endpoint reporting service and store state.
//!
//! Responds `200` with `status: "UP"` when the store answers a ping and `503`
//! with `status: "DEGRADED"` otherwise, so orchestrators can act on the code
//! alone. Probe failure causes are logged, never returned.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::StoreProbe;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::schemas::HealthEnvelopeSchema;
use crate::inbound::http::state::HttpState;

const UNREACHABLE: &str = "database unreachable";

/// Store section of the health payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatabaseHealth {
    /// `connected` or `disconnected`.
    #[schema(example = "connected")]
    pub state: String,
    /// `{"ok": 1}` on success, `{"error": "database unreachable"}` on failure.
    #[schema(value_type = Object)]
    pub ping: Value,
}

/// Health payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthReport {
    /// `UP` or `DEGRADED`.
    #[schema(example = "UP")]
    pub status: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
    /// Service name.
    #[schema(example = "MiniCRM API")]
    pub service: String,
    /// Store state.
    pub database: DatabaseHealth,
}

impl HealthReport {
    /// Build a report from a probe outcome. The failure cause is logged and
    /// replaced by a fixed message.
    pub fn from_probe(probe: &StoreProbe, service: &str, timestamp: DateTime<Utc>) -> Self {
        let ping = match &probe.error {
            None => json!({"ok": 1}),
            Some(cause) => {
                warn!(error = %cause, "health check found the store unreachable");
                json!({"error": UNREACHABLE})
            }
        };
        Self {
            status: if probe.is_healthy() { "UP" } else { "DEGRADED" }.to_owned(),
            timestamp,
            service: service.to_owned(),
            database: DatabaseHealth {
                state: probe.state.as_str().to_owned(),
                ping,
            },
        }
    }
}

/// Service health including a store ping.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthEnvelopeSchema),
        (status = 503, description = "Store unreachable", body = HealthEnvelopeSchema)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let probe = state.store_health.probe().await;
    let report = HealthReport::from_probe(&probe, &state.service_name, Utc::now());
    let (status, message) = if probe.is_healthy() {
        (StatusCode::OK, "Service is healthy")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service degraded - database unavailable",
        )
    };
    let mut response = ApiResponse::new(status, message, Some(report)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
