//! Uniform response envelope shared by every endpoint.
//!
//! ```json
//! {"status":"success","message":"Properties fetched successfully","statusCode":200,"data":[],"meta":{}}
//! ```
//!
//! `status` is derived from `statusCode`, `data` is omitted when absent and
//! `meta` appears only on listing responses.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::PageMeta;
use serde::Serialize;

/// Outcome marker derived from the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Status code below 400.
    Success,
    /// Status code 400 or above.
    Fail,
}

impl ResponseStatus {
    /// Classify an HTTP status.
    pub fn for_status(status: StatusCode) -> Self {
        if status.as_u16() < 400 {
            Self::Success
        } else {
            Self::Fail
        }
    }
}

/// Response envelope around an optional payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Outcome marker.
    pub status: ResponseStatus,
    /// Human-readable summary.
    pub message: String,
    /// Numeric HTTP status.
    pub status_code: u16,
    /// Payload, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination metadata on listing responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope carrying `data`.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::for_status(status),
            message: message.into(),
            status_code: status.as_u16(),
            data,
            meta: None,
        }
    }

    /// Attach listing metadata.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Render as an HTTP response with the envelope's status code.
    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

/// `200 OK` envelope around `data`.
pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    ApiResponse::new(StatusCode::OK, message, Some(data)).into_response()
}

/// `201 Created` envelope around `data`.
pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    ApiResponse::new(StatusCode::CREATED, message, Some(data)).into_response()
}
