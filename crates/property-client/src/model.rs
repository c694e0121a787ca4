//! Wire types exchanged with the property API.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::{PageMeta, PageRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sale state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// On the market.
    #[default]
    Available,
    /// No longer on the market.
    Sold,
}

impl PropertyStatus {
    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text names neither status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Status must be either \"available\" or \"sold\"")]
pub struct UnknownStatus(pub String);

impl FromStr for PropertyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// Price in integer minor units with its currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Minor units (cents for USD).
    pub price: u64,
    /// Three-letter upper-case code.
    pub currency: String,
}

/// A stored listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// 24-character hexadecimal identifier.
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Asking price.
    pub amount: Amount,
    /// Free-text location.
    pub location: String,
    /// Bedroom count.
    pub bedrooms: u32,
    /// Bathroom count.
    pub bathrooms: u32,
    /// Sale state.
    pub status: PropertyStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

/// Body sent to create or replace a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPayload {
    /// Listing title.
    pub title: String,
    /// Asking price in minor units.
    pub amount: Amount,
    /// Free-text location.
    pub location: String,
    /// Bedroom count.
    pub bedrooms: u32,
    /// Bathroom count.
    pub bathrooms: u32,
    /// Sale state.
    pub status: PropertyStatus,
}

/// Count of listings per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCount {
    /// Listings still available.
    pub available: u64,
    /// Listings sold.
    pub sold: u64,
}

/// Room averages for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    /// Location string as stored.
    pub location: String,
    /// Mean bedrooms, two decimals.
    pub average_bedrooms: f64,
    /// Mean bathrooms, two decimals.
    pub average_bathrooms: f64,
}

/// Aggregate view over the whole collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStatistics {
    /// Number of listings.
    pub total_properties: u64,
    /// Mean price in minor units keyed by currency.
    pub average_price: BTreeMap<String, f64>,
    /// Listings per status.
    pub status_count: StatusCount,
    /// Room averages per location.
    pub location_stats: Vec<LocationStats>,
}

/// Filters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page and page size.
    pub page: PageRequest,
    /// Search text; `None` lists everything.
    pub search: Option<String>,
}

impl ListQuery {
    /// Build a query, dropping blank search text.
    #[must_use]
    pub fn new(page: PageRequest, search: &str) -> Self {
        let trimmed = search.trim();
        Self {
            page,
            search: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
        }
    }
}

/// Success envelope returned by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
    pub(crate) meta: Option<PageMeta>,
}

/// The part of the error envelope the client reads.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_listing_envelope() {
        let body = json!({
            "status": "success",
            "message": "Properties fetched successfully",
            "statusCode": 200,
            "data": [{
                "id": "65f0c0ffee00000000000001",
                "title": "Sunny loft",
                "amount": {"price": 1234, "currency": "USD"},
                "location": "Austin, Texas",
                "bedrooms": 2,
                "bathrooms": 1,
                "status": "sold",
                "createdAt": "2025-01-02T03:04:05Z",
                "updatedAt": "2025-01-02T03:04:05Z"
            }],
            "meta": {"totalItems": 1, "itemCount": 1, "itemsPerPage": 10, "totalPages": 1, "currentPage": 1}
        });

        let envelope: Envelope<Vec<Property>> =
            serde_json::from_value(body).expect("envelope decodes");

        let items = envelope.data.expect("data");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|p| p.amount.price), Some(1234));
        assert_eq!(items.first().map(|p| p.status), Some(PropertyStatus::Sold));
        assert_eq!(envelope.meta.map(|meta| meta.total_pages), Some(1));
    }

    #[rstest]
    fn payload_uses_nested_amount() {
        let payload = PropertyPayload {
            title: "Sunny loft".to_owned(),
            amount: Amount {
                price: 1234,
                currency: "USD".to_owned(),
            },
            location: "Austin, Texas".to_owned(),
            bedrooms: 2,
            bathrooms: 1,
            status: PropertyStatus::Available,
        };

        let value = serde_json::to_value(&payload).expect("payload encodes");
        assert_eq!(value["amount"], json!({"price": 1234, "currency": "USD"}));
        assert_eq!(value["status"], "available");
    }

    #[rstest]
    #[case("  ", None)]
    #[case("", None)]
    #[case(" cairo ", Some("cairo"))]
    fn blank_search_is_dropped(#[case] raw: &str, #[case] expected: Option<&str>) {
        let query = ListQuery::new(PageRequest::default(), raw);
        assert_eq!(query.search.as_deref(), expected);
    }

    #[rstest]
    #[case("available", PropertyStatus::Available)]
    #[case(" SOLD ", PropertyStatus::Sold)]
    fn parses_status(#[case] raw: &str, #[case] expected: PropertyStatus) {
        assert_eq!(raw.parse::<PropertyStatus>(), Ok(expected));
    }
}
