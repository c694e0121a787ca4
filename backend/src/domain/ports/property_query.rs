//! Driving port for property reads.
//!
//! Inbound adapters list and summarise properties through this port without
//! importing persistence concerns.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::{Error, Property, PropertyFilter, PropertyStatistics};

/// Domain use-case port for property reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyQuery: Send + Sync {
    /// One page of the filtered listing with its metadata.
    async fn list(&self, filter: &PropertyFilter) -> Result<Paginated<Property>, Error>;

    /// Collection-wide statistics.
    async fn statistics(&self) -> Result<PropertyStatistics, Error>;
}
