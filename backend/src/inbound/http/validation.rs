//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, bad query strings, bad path segments)
//! and domain validation failures all become `400 invalid_request` errors
//! with `{field, code}` details.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, ListingValidationError, PropertyId, PropertyValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidQuery,
    InvalidPath,
    OutOfRange,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::TooLong => "too_long",
        }
    }
}

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Map a domain property validation failure.
pub(crate) fn property_validation_error(err: &PropertyValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

/// Map a listing filter validation failure.
pub(crate) fn listing_validation_error(err: &ListingValidationError) -> Error {
    let code = match err {
        ListingValidationError::Page(_) => ErrorCode::OutOfRange,
        ListingValidationError::SearchTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(err.to_string(), err.field(), code.as_str())
}

/// Validate a path identifier before any business logic runs.
pub(crate) fn parse_property_id(raw: &str) -> Result<PropertyId, Error> {
    PropertyId::parse(raw).map_err(|err| property_validation_error(&err))
}

fn json_error(err: &JsonPayloadError) -> Error {
    let message = match err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("Invalid request body: {inner}"),
        other => format!("Invalid request body: {other}"),
    };
    field_error(message, "body", ErrorCode::InvalidJson.as_str())
}

fn query_error(err: &QueryPayloadError) -> Error {
    field_error(
        format!("Invalid query string: {err}"),
        "query",
        ErrorCode::InvalidQuery.as_str(),
    )
}

fn path_error(err: &PathError) -> Error {
    field_error(
        format!("Invalid path: {err}"),
        "path",
        ErrorCode::InvalidPath.as_str(),
    )
}

/// JSON body extractor configuration emitting the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| json_error(&err).into())
}

/// Query string extractor configuration emitting the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| query_error(&err).into())
}

/// Path extractor configuration emitting the error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _req: &HttpRequest| path_error(&err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainErrorCode, PropertyFilter};
    use rstest::rstest;

    #[rstest]
    fn malformed_ids_become_field_errors() {
        let err = parse_property_id("not-an-id").expect_err("rejected");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "id", "code": "invalid_id"}))
        );
    }

    #[rstest]
    fn listing_errors_name_the_query_parameter() {
        let err = PropertyFilter::from_query(None, Some(500), None).expect_err("take too big");
        let mapped = listing_validation_error(&err);
        assert_eq!(
            mapped.details(),
            Some(&json!({"field": "take", "code": "out_of_range"}))
        );
    }

    #[rstest]
    fn content_type_errors_have_a_fixed_message() {
        let err = json_error(&JsonPayloadError::ContentType);
        assert_eq!(err.message(), "Content type must be application/json");
    }
}
