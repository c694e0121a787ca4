//! Property domain service implementing the read and write driving ports.
//!
//! Repository failures never leak to callers: the cause is logged and the
//! caller receives a fixed message. Writes surface as `unprocessable_entity`,
//! reads as `internal_error`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Paginated;
use tracing::{debug, error};

use crate::domain::ports::{
    PropertyCommand, PropertyQuery, PropertyRepository, PropertyRepositoryError,
};
use crate::domain::{Error, Property, PropertyDraft, PropertyFilter, PropertyId, PropertyStatistics};

const NOT_FOUND: &str = "Property not found";

/// Property service backed by a [`PropertyRepository`].
#[derive(Clone)]
pub struct PropertyService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PropertyService<R> {
    /// Create a service over `repo`, stamping writes with `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use backend::domain::PropertyService;
    /// # use backend::outbound::memory::InMemoryPropertyRepository;
    /// # use mockable::DefaultClock;
    /// let service = PropertyService::new(
    ///     Arc::new(InMemoryPropertyRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn write_failure(action: &'static str, err: &PropertyRepositoryError) -> Error {
    error!(error = %err, action, "property write failed");
    Error::unprocessable(format!("Failed to {action} property"))
}

fn read_failure(message: &'static str, err: &PropertyRepositoryError) -> Error {
    error!(error = %err, "property read failed");
    Error::internal(message)
}

#[async_trait]
impl<R> PropertyQuery for PropertyService<R>
where
    R: PropertyRepository,
{
    async fn list(&self, filter: &PropertyFilter) -> Result<Paginated<Property>, Error> {
        let (items, total) =
            tokio::try_join!(self.repo.find_page(filter), self.repo.count(filter))
                .map_err(|err| read_failure("Failed to fetch properties", &err))?;
        debug!(
            page = filter.page.page(),
            take = filter.page.take(),
            total,
            "listed properties"
        );
        Ok(Paginated::new(items, filter.page, total))
    }

    async fn statistics(&self) -> Result<PropertyStatistics, Error> {
        self.repo
            .statistics()
            .await
            .map_err(|err| read_failure("Failed to compute statistics", &err))
    }
}

#[async_trait]
impl<R> PropertyCommand for PropertyService<R>
where
    R: PropertyRepository,
{
    async fn create(&self, draft: PropertyDraft) -> Result<Property, Error> {
        self.repo
            .insert(&draft, self.clock.utc())
            .await
            .map_err(|err| write_failure("create", &err))
    }

    async fn replace(&self, id: &PropertyId, draft: PropertyDraft) -> Result<Property, Error> {
        self.repo
            .replace(id, &draft, self.clock.utc())
            .await
            .map_err(|err| write_failure("update", &err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn delete(&self, id: &PropertyId) -> Result<Property, Error> {
        self.repo
            .delete(id)
            .await
            .map_err(|err| write_failure("delete", &err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "property_service_tests.rs"]
mod tests;
