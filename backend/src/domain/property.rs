//! Property records and the validated drafts used to create or replace them.
//!
//! Prices are integer minor currency units (cents) end to end; nothing in the
//! domain ever holds a price as a float.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shortest accepted title, in characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Shortest accepted location, in characters.
pub const LOCATION_MIN_CHARS: usize = 5;
/// Longest accepted location, in characters.
pub const LOCATION_MAX_CHARS: usize = 255;
/// Length of a property identifier in hexadecimal characters.
pub const PROPERTY_ID_LEN: usize = 24;

/// Validation failures for property identifiers and drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyValidationError {
    /// Identifier is not 24 hexadecimal characters.
    #[error("id must be a 24-character hexadecimal identifier")]
    InvalidId {
        /// Rejected identifier.
        value: String,
    },
    /// Title length outside the accepted range.
    #[error("title must be between {min} and {max} characters")]
    TitleLength {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
        /// Observed length after trimming.
        actual: usize,
    },
    /// Price below zero.
    #[error("amount.price must be a non-negative integer")]
    NegativePrice {
        /// Rejected price.
        price: i64,
    },
    /// Currency is not three ASCII letters.
    #[error("amount.currency must be a 3-letter currency code")]
    InvalidCurrency {
        /// Rejected currency.
        value: String,
    },
    /// Location length outside the accepted range.
    #[error("location must be between {min} and {max} characters")]
    LocationLength {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
        /// Observed length after trimming.
        actual: usize,
    },
    /// Bedroom count below one.
    #[error("bedrooms must be at least 1")]
    InvalidBedrooms {
        /// Rejected value.
        value: i64,
    },
    /// Bathroom count below one.
    #[error("bathrooms must be at least 1")]
    InvalidBathrooms {
        /// Rejected value.
        value: i64,
    },
}

impl PropertyValidationError {
    /// Request field the failure refers to, in wire notation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "id",
            Self::TitleLength { .. } => "title",
            Self::NegativePrice { .. } => "amount.price",
            Self::InvalidCurrency { .. } => "amount.currency",
            Self::LocationLength { .. } => "location",
            Self::InvalidBedrooms { .. } => "bedrooms",
            Self::InvalidBathrooms { .. } => "bathrooms",
        }
    }

    /// Stable code describing the violated constraint.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::TitleLength { .. } | Self::LocationLength { .. } => "length_out_of_range",
            Self::NegativePrice { .. } => "negative_price",
            Self::InvalidCurrency { .. } => "invalid_currency",
            Self::InvalidBedrooms { .. } | Self::InvalidBathrooms { .. } => "below_minimum",
        }
    }
}

/// Opaque 24-character hexadecimal identifier, assigned by the store.
///
/// Stored in lower case so lookups are insensitive to the caller's casing.
///
/// # Examples
/// ```
/// use backend::domain::PropertyId;
///
/// let id = PropertyId::parse("65F0C0FFEE00000000000001").expect("valid id");
/// assert_eq!(id.as_str(), "65f0c0ffee00000000000001");
/// assert!(PropertyId::parse("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(String);

impl PropertyId {
    /// Validate and normalise an identifier.
    ///
    /// # Errors
    /// Returns [`PropertyValidationError::InvalidId`] unless `raw` is exactly
    /// 24 ASCII hexadecimal characters.
    pub fn parse(raw: &str) -> Result<Self, PropertyValidationError> {
        if raw.len() != PROPERTY_ID_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PropertyValidationError::InvalidId {
                value: raw.to_owned(),
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Hexadecimal representation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sale status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// On the market.
    #[default]
    Available,
    /// No longer on the market.
    Sold,
}

impl PropertyStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 2] = [Self::Available, Self::Sold];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
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

/// Unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of: available, sold")]
pub struct UnknownStatus(pub String);

impl FromStr for PropertyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Three-letter upper-case currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validate a currency code, normalising it to upper case.
    ///
    /// # Errors
    /// Returns [`PropertyValidationError::InvalidCurrency`] unless `raw` is
    /// three ASCII letters.
    pub fn parse(raw: &str) -> Result<Self, PropertyValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PropertyValidationError::InvalidCurrency {
                value: raw.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price in minor currency units together with its currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// Price in minor units (for example cents).
    pub price: u64,
    /// Currency the price is expressed in.
    pub currency: CurrencyCode,
}

/// A persisted property record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Store-assigned identifier.
    pub id: PropertyId,
    /// Listing title.
    pub title: String,
    /// Asking price.
    pub amount: Amount,
    /// Free-text location; grouped literally by statistics.
    pub location: String,
    /// Number of bedrooms, at least one.
    pub bedrooms: u32,
    /// Number of bathrooms, at least one.
    pub bathrooms: u32,
    /// Sale status.
    pub status: PropertyStatus,
    /// Creation time, preserved across replacements.
    pub created_at: DateTime<Utc>,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Materialise a record from a validated draft.
    pub fn from_draft(
        id: PropertyId,
        draft: PropertyDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let PropertyDraft {
            title,
            amount,
            location,
            bedrooms,
            bathrooms,
            status,
        } = draft;
        Self {
            id,
            title,
            amount,
            location,
            bedrooms,
            bathrooms,
            status,
            created_at,
            updated_at,
        }
    }
}

/// Unvalidated property fields as received from an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDraftInput {
    /// Raw title.
    pub title: String,
    /// Raw price in minor units.
    pub price: i64,
    /// Raw currency code.
    pub currency: String,
    /// Raw location.
    pub location: String,
    /// Raw bedroom count.
    pub bedrooms: i64,
    /// Raw bathroom count.
    pub bathrooms: i64,
    /// Requested status; `None` means [`PropertyStatus::Available`].
    pub status: Option<PropertyStatus>,
}

/// Validated field set for creating or fully replacing a property.
///
/// ## Invariants
/// - title is 3–100 characters and location 5–255 characters, both trimmed;
/// - bedrooms and bathrooms are at least one;
/// - the currency is three upper-case ASCII letters.
///
/// # Examples
/// ```
/// use backend::domain::{PropertyDraft, PropertyDraftInput, PropertyStatus};
///
/// let draft = PropertyDraft::try_from_input(PropertyDraftInput {
///     title: "Nile view flat".into(),
///     price: 1234,
///     currency: "egp".into(),
///     location: "Zamalek, Cairo".into(),
///     bedrooms: 2,
///     bathrooms: 1,
///     status: None,
/// })
/// .expect("valid draft");
/// assert_eq!(draft.amount().price, 1234);
/// assert_eq!(draft.amount().currency.as_str(), "EGP");
/// assert_eq!(draft.status(), PropertyStatus::Available);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDraft {
    title: String,
    amount: Amount,
    location: String,
    bedrooms: u32,
    bathrooms: u32,
    status: PropertyStatus,
}

impl PropertyDraft {
    /// Validate raw input into a draft.
    ///
    /// # Errors
    /// Returns the first violated constraint as a [`PropertyValidationError`].
    pub fn try_from_input(input: PropertyDraftInput) -> Result<Self, PropertyValidationError> {
        let PropertyDraftInput {
            title,
            price,
            currency,
            location,
            bedrooms,
            bathrooms,
            status,
        } = input;

        let title = bounded_text(&title, TITLE_MIN_CHARS, TITLE_MAX_CHARS).map_err(|actual| {
            PropertyValidationError::TitleLength {
                min: TITLE_MIN_CHARS,
                max: TITLE_MAX_CHARS,
                actual,
            }
        })?;
        let price =
            u64::try_from(price).map_err(|_| PropertyValidationError::NegativePrice { price })?;
        let currency = CurrencyCode::parse(&currency)?;
        let location = bounded_text(&location, LOCATION_MIN_CHARS, LOCATION_MAX_CHARS).map_err(
            |actual| PropertyValidationError::LocationLength {
                min: LOCATION_MIN_CHARS,
                max: LOCATION_MAX_CHARS,
                actual,
            },
        )?;
        let bedrooms = positive_count(bedrooms)
            .ok_or(PropertyValidationError::InvalidBedrooms { value: bedrooms })?;
        let bathrooms = positive_count(bathrooms)
            .ok_or(PropertyValidationError::InvalidBathrooms { value: bathrooms })?;

        Ok(Self {
            title,
            amount: Amount { price, currency },
            location,
            bedrooms,
            bathrooms,
            status: status.unwrap_or_default(),
        })
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Price and currency.
    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Trimmed location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Bedroom count.
    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    /// Bathroom count.
    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    /// Status, defaulted to available.
    pub fn status(&self) -> PropertyStatus {
        self.status
    }
}

/// Trim `raw` and check its length in characters; `Err` carries the length.
fn bounded_text(raw: &str, min: usize, max: usize) -> Result<String, usize> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if (min..=max).contains(&chars) {
        Ok(trimmed.to_owned())
    } else {
        Err(chars)
    }
}

fn positive_count(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|count| *count >= 1)
}
