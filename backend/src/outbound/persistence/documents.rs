//! BSON document shape of the `properties` collection.
//!
//! Documents are an internal detail of the Mongo adapter and never leave it.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::PropertyRepositoryError;
use crate::domain::{
    Amount, CurrencyCode, Property, PropertyDraft, PropertyId, PropertyStatus,
};

/// Price sub-document. BSON has no unsigned 64-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AmountDocument {
    pub(crate) price: i64,
    pub(crate) currency: String,
}

/// One stored property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyDocument {
    #[serde(rename = "_id")]
    pub(crate) id: ObjectId,
    pub(crate) title: String,
    pub(crate) amount: AmountDocument,
    pub(crate) location: String,
    pub(crate) bedrooms: i64,
    pub(crate) bathrooms: i64,
    pub(crate) status: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub(crate) updated_at: DateTime<Utc>,
}

/// Encode a price for storage.
pub(crate) fn encode_price(price: u64) -> Result<i64, PropertyRepositoryError> {
    i64::try_from(price)
        .map_err(|_| PropertyRepositoryError::query(format!("price {price} exceeds storage range")))
}

/// Convert a domain identifier to an object id.
pub(crate) fn object_id(id: &PropertyId) -> Result<ObjectId, PropertyRepositoryError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|err| PropertyRepositoryError::query(format!("invalid object id {id}: {err}")))
}

impl PropertyDocument {
    /// Build a fresh document from a validated draft.
    pub(crate) fn from_draft(
        id: ObjectId,
        draft: &PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, PropertyRepositoryError> {
        Ok(Self {
            id,
            title: draft.title().to_owned(),
            amount: AmountDocument {
                price: encode_price(draft.amount().price)?,
                currency: draft.amount().currency.to_string(),
            },
            location: draft.location().to_owned(),
            bedrooms: i64::from(draft.bedrooms()),
            bathrooms: i64::from(draft.bathrooms()),
            status: draft.status().as_str().to_owned(),
            created_at: now,
            updated_at: now,
        })
    }
}

fn decode_error(id: &ObjectId, what: &str) -> PropertyRepositoryError {
    PropertyRepositoryError::decode(format!("document {id}: {what}"))
}

impl TryFrom<PropertyDocument> for Property {
    type Error = PropertyRepositoryError;

    fn try_from(doc: PropertyDocument) -> Result<Self, Self::Error> {
        let raw_id = doc.id;
        let id = PropertyId::parse(&raw_id.to_hex())
            .map_err(|err| decode_error(&raw_id, &err.to_string()))?;
        let price =
            u64::try_from(doc.amount.price).map_err(|_| decode_error(&raw_id, "negative price"))?;
        let currency = CurrencyCode::parse(&doc.amount.currency)
            .map_err(|err| decode_error(&raw_id, &err.to_string()))?;
        let bedrooms =
            u32::try_from(doc.bedrooms).map_err(|_| decode_error(&raw_id, "bedrooms out of range"))?;
        let bathrooms = u32::try_from(doc.bathrooms)
            .map_err(|_| decode_error(&raw_id, "bathrooms out of range"))?;
        let status: PropertyStatus = doc
            .status
            .parse()
            .map_err(|err: crate::domain::UnknownStatus| decode_error(&raw_id, &err.to_string()))?;

        Ok(Self {
            id,
            title: doc.title,
            amount: Amount { price, currency },
            location: doc.location,
            bedrooms,
            bathrooms,
            status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}
