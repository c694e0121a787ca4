//! In-memory property repository.
//!
//! Used for demos (`PROPERTIES_MEMORY_STORE=true`) and for HTTP tests that
//! exercise the full stack without a database. Listing, search and statistics
//! follow the same rules as the MongoDB adapter.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    PropertyRepository, PropertyRepositoryError, StoreHealth, StoreProbe,
};
use crate::domain::{
    Property, PropertyDraft, PropertyFilter, PropertyId, PropertyStatistics, newest_first,
};

/// Property repository holding records in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryPropertyRepository {
    records: RwLock<BTreeMap<PropertyId, Property>>,
    next_id: AtomicU64,
}

fn poisoned<T>(_: PoisonError<T>) -> PropertyRepositoryError {
    PropertyRepositoryError::query("in-memory store lock poisoned")
}

impl InMemoryPropertyRepository {
    fn allocate_id(&self) -> Result<PropertyId, PropertyRepositoryError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        PropertyId::parse(&format!("{n:024x}"))
            .map_err(|err| PropertyRepositoryError::query(err.to_string()))
    }

    fn filtered(&self, filter: &PropertyFilter) -> Result<Vec<Property>, PropertyRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut matches: Vec<Property> = records
            .values()
            .filter(|property| filter.admits(property))
            .cloned()
            .collect();
        matches.sort_by(newest_first);
        Ok(matches)
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn insert(
        &self,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Property, PropertyRepositoryError> {
        let id = self.allocate_id()?;
        let property = Property::from_draft(id.clone(), draft.clone(), now, now);
        self.records
            .write()
            .map_err(poisoned)?
            .insert(id, property.clone());
        Ok(property)
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let skip = usize::try_from(filter.page.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(filter.page.take()).unwrap_or(usize::MAX);
        Ok(self
            .filtered(filter)?
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<u64, PropertyRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        let count = records.values().filter(|property| filter.admits(property)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn replace(
        &self,
        id: &PropertyId,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let Some(existing) = records.get_mut(id) else {
            return Ok(None);
        };
        *existing = Property::from_draft(id.clone(), draft.clone(), existing.created_at, now);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &PropertyId) -> Result<Option<Property>, PropertyRepositoryError> {
        Ok(self.records.write().map_err(poisoned)?.remove(id))
    }

    async fn statistics(&self) -> Result<PropertyStatistics, PropertyRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(PropertyStatistics::from_properties(records.values()))
    }
}

#[async_trait]
impl StoreHealth for InMemoryPropertyRepository {
    async fn probe(&self) -> StoreProbe {
        match self.records.read() {
            Ok(_) => StoreProbe::connected(),
            Err(_) => StoreProbe::disconnected("in-memory store lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PropertyDraftInput, PropertyStatus};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    fn draft(title: &str, location: &str) -> PropertyDraft {
        PropertyDraft::try_from_input(PropertyDraftInput {
            title: title.into(),
            price: 1000,
            currency: "EGP".into(),
            location: location.into(),
            bedrooms: 2,
            bathrooms: 1,
            status: None,
        })
        .expect("valid draft")
    }

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
            + Duration::minutes(minute)
    }

    #[fixture]
    async fn seeded() -> InMemoryPropertyRepository {
        let repo = InMemoryPropertyRepository::default();
        repo.insert(&draft("Nile view flat", "Zamalek, Cairo"), at(0))
            .await
            .expect("insert");
        repo.insert(&draft("Desert villa", "Riyadh, KSA"), at(1))
            .await
            .expect("insert");
        repo.insert(&draft("Cairo loft", "Maadi, Egypt"), at(1))
            .await
            .expect("insert");
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_newest_first_with_id_tiebreak(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let page = repo
            .find_page(&PropertyFilter::default())
            .await
            .expect("listed");

        let titles: Vec<&str> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Cairo loft", "Desert villa", "Nile view flat"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_matches_title_or_location(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let filter = PropertyFilter::from_query(None, None, Some("CAIRO")).expect("valid");

        let page = repo.find_page(&filter).await.expect("listed");
        let total = repo.count(&filter).await.expect("counted");

        assert_eq!(total, 2);
        assert!(page.iter().all(|p| p.title.contains("Cairo") || p.location.contains("Cairo")));
    }

    #[rstest]
    #[tokio::test]
    async fn paging_skips_and_limits(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let filter = PropertyFilter::from_query(Some(2), Some(2), None).expect("valid");

        let page = repo.find_page(&filter).await.expect("listed");

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Nile view flat");
    }

    #[rstest]
    #[tokio::test]
    async fn replace_keeps_created_at(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let first = repo
            .find_page(&PropertyFilter::default())
            .await
            .expect("listed")
            .remove(0);

        let replacement = PropertyDraft::try_from_input(PropertyDraftInput {
            title: "Cairo loft, renovated".into(),
            price: 2000,
            currency: "EGP".into(),
            location: "Maadi, Egypt".into(),
            bedrooms: 3,
            bathrooms: 2,
            status: Some(PropertyStatus::Sold),
        })
        .expect("valid draft");
        let updated = repo
            .replace(&first.id, &replacement, at(10))
            .await
            .expect("replaced")
            .expect("exists");

        assert_eq!(updated.created_at, first.created_at);
        assert_eq!(updated.updated_at, at(10));
        assert_eq!(updated.status, PropertyStatus::Sold);
        assert_eq!(updated.amount.price, 2000);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_hard(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let victim = repo
            .find_page(&PropertyFilter::default())
            .await
            .expect("listed")
            .remove(0);

        let removed = repo.delete(&victim.id).await.expect("deleted");
        let again = repo.delete(&victim.id).await.expect("second delete");

        assert_eq!(removed, Some(victim));
        assert_eq!(again, None);
        assert_eq!(repo.count(&PropertyFilter::default()).await.expect("count"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn statistics_cover_every_record(#[future] seeded: InMemoryPropertyRepository) {
        let repo = seeded.await;
        let stats = repo.statistics().await.expect("stats");

        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.average_price.get("EGP"), Some(&1000.0));
        assert_eq!(stats.status_count.available, 3);
        assert_eq!(stats.location_stats.len(), 3);
    }
}
