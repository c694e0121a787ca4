//! Domain primitives, services and ports.
//!
//! Purpose: define the property model, its validation rules and the use cases
//! that operate on it, independent of HTTP and of the document store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Property, PropertyDraft, PropertyId: the persisted record and its inputs.
//! - PropertyFilter, SearchTerm: validated listing queries.
//! - PropertyStatistics: collection-wide aggregates.
//! - PropertyService: implementation of the `PropertyQuery` and
//!   `PropertyCommand` driving ports.

pub mod error;
pub mod listing;
pub mod ports;
pub mod property;
mod property_service;
pub mod statistics;
mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    ListingValidationError, PropertyFilter, SEARCH_MAX_CHARS, SearchTerm, newest_first,
};
pub use self::property::{
    Amount, CurrencyCode, Property, PropertyDraft, PropertyDraftInput, PropertyId,
    PropertyStatus, PropertyValidationError, UnknownStatus,
};
pub use self::property_service::PropertyService;
pub use self::statistics::{LocationStats, PropertyStatistics, StatusCount, round2};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Property not found"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
