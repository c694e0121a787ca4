//! MongoDB-backed `PropertyRepository` implementation.
//!
//! Search text is escaped before it is embedded in a `$regex`, so matching is
//! a literal, case-insensitive substring test on `title` or `location`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::options::ReturnDocument;
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{PropertyRepository, PropertyRepositoryError};
use crate::domain::{
    LocationStats, Property, PropertyDraft, PropertyFilter, PropertyId, PropertyStatistics,
    SearchTerm, StatusCount, round2,
};

use super::documents::{PropertyDocument, encode_price, object_id};
use super::mongo_error_mapping::map_mongo_error;

/// Name of the backing collection.
pub const PROPERTIES_COLLECTION: &str = "properties";

/// MongoDB implementation of the `PropertyRepository` port.
#[derive(Clone)]
pub struct MongoPropertyRepository {
    collection: Collection<PropertyDocument>,
}

impl MongoPropertyRepository {
    /// Wrap an existing collection handle.
    pub(crate) fn new(collection: Collection<PropertyDocument>) -> Self {
        Self { collection }
    }
}

/// Build the `$match` document for an optional search term.
pub(crate) fn search_filter(search: Option<&SearchTerm>) -> Document {
    match search {
        None => Document::new(),
        Some(term) => {
            let pattern = regex::escape(term.as_str());
            doc! {
                "$or": [
                    { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                    { "location": { "$regex": pattern.as_str(), "$options": "i" } },
                ]
            }
        }
    }
}

fn listing_sort() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

fn statistics_pipeline() -> Vec<Document> {
    vec![doc! {
        "$facet": {
            "total": [ { "$count": "count" } ],
            "averagePrice": [
                { "$group": { "_id": "$amount.currency", "average": { "$avg": "$amount.price" } } }
            ],
            "statusCount": [
                { "$group": { "_id": "$status", "count": { "$sum": 1 } } }
            ],
            "locationStats": [
                {
                    "$group": {
                        "_id": "$location",
                        "averageBedrooms": { "$avg": "$bedrooms" },
                        "averageBathrooms": { "$avg": "$bathrooms" }
                    }
                },
                { "$sort": { "_id": 1 } }
            ]
        }
    }]
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FacetResult {
    #[serde(default)]
    total: Vec<CountRow>,
    #[serde(default)]
    average_price: Vec<AverageRow>,
    #[serde(default)]
    status_count: Vec<StatusRow>,
    #[serde(default)]
    location_stats: Vec<LocationRow>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct AverageRow {
    #[serde(rename = "_id")]
    currency: String,
    average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    #[serde(rename = "_id")]
    status: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationRow {
    #[serde(rename = "_id")]
    location: String,
    average_bedrooms: Option<f64>,
    average_bathrooms: Option<f64>,
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl From<FacetResult> for PropertyStatistics {
    fn from(facets: FacetResult) -> Self {
        let total_properties = facets
            .total
            .first()
            .map_or(0, |row| non_negative(row.count));
        let average_price: BTreeMap<String, f64> = facets
            .average_price
            .into_iter()
            .map(|row| (row.currency, round2(row.average.unwrap_or(0.0))))
            .collect();
        let mut status_count = StatusCount::default();
        for row in facets.status_count {
            match row.status.as_str() {
                "available" => status_count.available = non_negative(row.count),
                "sold" => status_count.sold = non_negative(row.count),
                other => debug!(status = other, "ignoring unknown status in statistics"),
            }
        }
        let mut location_stats: Vec<LocationStats> = facets
            .location_stats
            .into_iter()
            .map(|row| LocationStats {
                location: row.location,
                average_bedrooms: round2(row.average_bedrooms.unwrap_or(0.0)),
                average_bathrooms: round2(row.average_bathrooms.unwrap_or(0.0)),
            })
            .collect();
        location_stats.sort_by(|a, b| a.location.cmp(&b.location));

        Self {
            total_properties,
            average_price,
            status_count,
            location_stats,
        }
    }
}

fn decode_all(docs: Vec<PropertyDocument>) -> Result<Vec<Property>, PropertyRepositoryError> {
    docs.into_iter().map(Property::try_from).collect()
}

fn decode_one(doc: Option<PropertyDocument>) -> Result<Option<Property>, PropertyRepositoryError> {
    doc.map(Property::try_from).transpose()
}

fn replacement_fields(
    draft: &PropertyDraft,
    now: DateTime<Utc>,
) -> Result<Document, PropertyRepositoryError> {
    Ok(doc! {
        "$set": {
            "title": draft.title(),
            "amount": {
                "price": encode_price(draft.amount().price)?,
                "currency": draft.amount().currency.as_str(),
            },
            "location": draft.location(),
            "bedrooms": i64::from(draft.bedrooms()),
            "bathrooms": i64::from(draft.bathrooms()),
            "status": draft.status().as_str(),
            "updatedAt": Bson::DateTime(bson::DateTime::from_chrono(now)),
        }
    })
}

#[async_trait]
impl PropertyRepository for MongoPropertyRepository {
    async fn insert(
        &self,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Property, PropertyRepositoryError> {
        let document = PropertyDocument::from_draft(ObjectId::new(), draft, now)?;
        self.collection
            .insert_one(&document)
            .await
            .map_err(|err| map_mongo_error(&err))?;
        Property::try_from(document)
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let limit = i64::from(filter.page.take());
        let docs: Vec<PropertyDocument> = self
            .collection
            .find(search_filter(filter.search.as_ref()))
            .sort(listing_sort())
            .skip(filter.page.skip())
            .limit(limit)
            .await
            .map_err(|err| map_mongo_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_mongo_error(&err))?;
        decode_all(docs)
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<u64, PropertyRepositoryError> {
        self.collection
            .count_documents(search_filter(filter.search.as_ref()))
            .await
            .map_err(|err| map_mongo_error(&err))
    }

    async fn replace(
        &self,
        id: &PropertyId,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": object_id(id)? }, replacement_fields(draft, now)?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|err| map_mongo_error(&err))?;
        decode_one(updated)
    }

    async fn delete(&self, id: &PropertyId) -> Result<Option<Property>, PropertyRepositoryError> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id(id)? })
            .await
            .map_err(|err| map_mongo_error(&err))?;
        decode_one(removed)
    }

    async fn statistics(&self) -> Result<PropertyStatistics, PropertyRepositoryError> {
        let mut cursor = self
            .collection
            .aggregate(statistics_pipeline())
            .await
            .map_err(|err| map_mongo_error(&err))?;
        let Some(facets) = cursor
            .try_next()
            .await
            .map_err(|err| map_mongo_error(&err))?
        else {
            return Ok(PropertyStatistics::default());
        };
        let facets: FacetResult = bson::from_document(facets)
            .map_err(|err| PropertyRepositoryError::decode(err.to_string()))?;
        Ok(facets.into())
    }
}
