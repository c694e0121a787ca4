//! Request and response bodies for the property endpoints.
//!
//! The request types are both the documented contract (`ToSchema`) and the
//! deserialisation target; [`TryFrom`] turns them into validated domain
//! drafts so the two can never drift apart.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    LocationStats, Property, PropertyDraft, PropertyDraftInput, PropertyStatistics,
    PropertyStatus, PropertyValidationError,
};

/// Sale status on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatusDto {
    /// On the market.
    Available,
    /// No longer on the market.
    Sold,
}

impl From<PropertyStatusDto> for PropertyStatus {
    fn from(value: PropertyStatusDto) -> Self {
        match value {
            PropertyStatusDto::Available => Self::Available,
            PropertyStatusDto::Sold => Self::Sold,
        }
    }
}

impl From<PropertyStatus> for PropertyStatusDto {
    fn from(value: PropertyStatus) -> Self {
        match value {
            PropertyStatus::Available => Self::Available,
            PropertyStatus::Sold => Self::Sold,
        }
    }
}

/// Price in minor units plus currency code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AmountDto {
    /// Price in minor currency units (cents).
    #[schema(example = 25_000_000, minimum = 0)]
    pub price: i64,
    /// Three-letter currency code.
    #[schema(example = "USD", min_length = 3, max_length = 3)]
    pub currency: String,
}

/// Body of `POST /properties` and `PUT /properties/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    /// Listing title.
    #[schema(example = "Sunny loft", min_length = 3, max_length = 100)]
    pub title: String,
    /// Asking price.
    pub amount: AmountDto,
    /// Free-text location.
    #[schema(example = "Austin, Texas", min_length = 5, max_length = 255)]
    pub location: String,
    /// Number of bedrooms.
    #[schema(example = 2, minimum = 1)]
    pub bedrooms: i64,
    /// Number of bathrooms.
    #[schema(example = 1, minimum = 1)]
    pub bathrooms: i64,
    /// Sale status; defaults to `available`.
    #[serde(default)]
    pub status: Option<PropertyStatusDto>,
}

impl TryFrom<PropertyRequest> for PropertyDraft {
    type Error = PropertyValidationError;

    fn try_from(value: PropertyRequest) -> Result<Self, Self::Error> {
        PropertyDraft::try_from_input(PropertyDraftInput {
            title: value.title,
            price: value.amount.price,
            currency: value.amount.currency,
            location: value.location,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            status: value.status.map(PropertyStatus::from),
        })
    }
}

/// Query string of `GET /properties`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPropertiesQuery {
    /// One-based page number (default 1).
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size (default 10, at most 100).
    #[param(minimum = 1, maximum = 100)]
    pub take: Option<u32>,
    /// Case-insensitive text matched against title and location.
    #[param(max_length = 100)]
    pub search: Option<String>,
}

/// Amount as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AmountResponse {
    /// Price in minor currency units.
    pub price: u64,
    /// Upper-case currency code.
    pub currency: String,
}

/// A stored property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    /// 24-character hexadecimal identifier.
    #[schema(example = "65f0c0ffee00000000000001")]
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Asking price.
    pub amount: AmountResponse,
    /// Location.
    pub location: String,
    /// Bedrooms.
    pub bedrooms: u32,
    /// Bathrooms.
    pub bathrooms: u32,
    /// Sale status.
    pub status: PropertyStatusDto,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(value: Property) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            amount: AmountResponse {
                price: value.amount.price,
                currency: value.amount.currency.to_string(),
            },
            location: value.location,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            status: value.status.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Properties per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCountResponse {
    /// Available properties.
    pub available: u64,
    /// Sold properties.
    pub sold: u64,
}

/// Room averages for one location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatsResponse {
    /// Location as stored.
    pub location: String,
    /// Mean bedrooms, two decimals.
    pub average_bedrooms: f64,
    /// Mean bathrooms, two decimals.
    pub average_bathrooms: f64,
}

impl From<LocationStats> for LocationStatsResponse {
    fn from(value: LocationStats) -> Self {
        Self {
            location: value.location,
            average_bedrooms: value.average_bedrooms,
            average_bathrooms: value.average_bathrooms,
        }
    }
}

/// Body of `GET /properties/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Number of stored properties.
    pub total_properties: u64,
    /// Mean price in minor units, keyed by currency.
    #[schema(example = json!({"EGP": 1000.0, "SAR": 2000.0}))]
    pub average_price: BTreeMap<String, f64>,
    /// Properties per status.
    pub status_count: StatusCountResponse,
    /// Room averages per location, sorted by location.
    pub location_stats: Vec<LocationStatsResponse>,
}

impl From<PropertyStatistics> for StatisticsResponse {
    fn from(value: PropertyStatistics) -> Self {
        Self {
            total_properties: value.total_properties,
            average_price: value.average_price,
            status_count: StatusCountResponse {
                available: value.status_count.available,
                sold: value.status_count.sold,
            },
            location_stats: value
                .location_stats
                .into_iter()
                .map(LocationStatsResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn missing_status_defaults_to_available() {
        let request: PropertyRequest = serde_json::from_value(json!({
            "title": "Sunny loft",
            "amount": {"price": 1234, "currency": "usd"},
            "location": "Austin, Texas",
            "bedrooms": 2,
            "bathrooms": 1,
            "status": null,
        }))
        .expect("valid body");

        let draft = PropertyDraft::try_from(request).expect("valid draft");
        assert_eq!(draft.status(), PropertyStatus::Available);
        assert_eq!(draft.amount().price, 1234);
    }

    #[rstest]
    fn unknown_status_fails_deserialisation() {
        let result = serde_json::from_value::<PropertyRequest>(json!({
            "title": "Sunny loft",
            "amount": {"price": 1234, "currency": "USD"},
            "location": "Austin, Texas",
            "bedrooms": 2,
            "bathrooms": 1,
            "status": "pending",
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn fractional_price_fails_deserialisation() {
        let result = serde_json::from_value::<PropertyRequest>(json!({
            "title": "Sunny loft",
            "amount": {"price": 12.34, "currency": "USD"},
            "location": "Austin, Texas",
            "bedrooms": 2,
            "bathrooms": 1,
        }));
        assert!(result.is_err());
    }
}
