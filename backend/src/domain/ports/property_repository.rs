//! Port for property persistence.
//!
//! Adapters own identifier assignment: `insert` returns the stored record
//! with its new id. Listing reads are split into `find_page` and `count` so
//! the service can run them concurrently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Property, PropertyDraft, PropertyFilter, PropertyId, PropertyStatistics};

use super::define_port_error;

define_port_error! {
    /// Errors raised by property repository adapters.
    pub enum PropertyRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "property repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "property repository query failed: {message}",
        /// A stored document could not be mapped to a property.
        Decode { message: String } =>
            "property repository returned an invalid document: {message}",
    }
}

/// Port for property storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Store a new property with both timestamps set to `now`.
    async fn insert(
        &self,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Property, PropertyRepositoryError>;

    /// Fetch one page of the filtered set, newest first.
    async fn find_page(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, PropertyRepositoryError>;

    /// Size of the filtered set, ignoring pagination.
    async fn count(&self, filter: &PropertyFilter) -> Result<u64, PropertyRepositoryError>;

    /// Replace every mutable field, keeping `created_at`.
    ///
    /// Returns `None` when no property has this id.
    async fn replace(
        &self,
        id: &PropertyId,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Property>, PropertyRepositoryError>;

    /// Remove a property, returning the deleted record when it existed.
    async fn delete(&self, id: &PropertyId) -> Result<Option<Property>, PropertyRepositoryError>;

    /// Aggregate statistics over the whole collection.
    async fn statistics(&self) -> Result<PropertyStatistics, PropertyRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn errors_render_their_cause() {
        let err = PropertyRepositoryError::connection("server selection timeout");
        assert_eq!(
            err.to_string(),
            "property repository connection failed: server selection timeout"
        );
    }
}
