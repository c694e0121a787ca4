//! Driving port for property writes.

use async_trait::async_trait;

use crate::domain::{Error, Property, PropertyDraft, PropertyId};

/// Domain use-case port for creating, replacing and deleting properties.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyCommand: Send + Sync {
    /// Store a new property.
    async fn create(&self, draft: PropertyDraft) -> Result<Property, Error>;

    /// Replace an existing property. Fails with `not_found` for unknown ids.
    async fn replace(&self, id: &PropertyId, draft: PropertyDraft) -> Result<Property, Error>;

    /// Hard-delete a property and return the removed record.
    async fn delete(&self, id: &PropertyId) -> Result<Property, Error>;
}
