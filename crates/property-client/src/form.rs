//! Property form input and its client-side validation.
//!
//! The rules mirror what the server enforces so most mistakes are caught
//! before a request is made. Every failing field is reported, not just the
//! first.

use thiserror::Error;

use crate::model::{Amount, Property, PropertyPayload, PropertyStatus};
use crate::money;

const TITLE_CHARS: (usize, usize) = (3, 100);
const LOCATION_CHARS: (usize, usize) = (5, 255);
const MIN_PRICE_MINOR: u64 = 1;

/// One failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field name as shown in the form.
    pub field: &'static str,
    /// What to fix.
    pub message: String,
}

/// Every failing field of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_fields(.0))]
pub struct FormErrors(pub Vec<FieldError>);

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    /// Whether `field` failed.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

/// Raw form input. The price is major-unit text, e.g. `"12.34"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyForm {
    /// Listing title.
    pub title: String,
    /// Price in major units as typed.
    pub price: String,
    /// Currency code as typed.
    pub currency: String,
    /// Free-text location.
    pub location: String,
    /// Bedroom count.
    pub bedrooms: u32,
    /// Bathroom count.
    pub bathrooms: u32,
    /// Sale state; required.
    pub status: Option<PropertyStatus>,
}

impl PropertyForm {
    /// Prefill a form for editing `property`.
    #[must_use]
    pub fn from_property(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            price: money::format_minor(property.amount.price),
            currency: property.amount.currency.clone(),
            location: property.location.clone(),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            status: Some(property.status),
        }
    }

    /// Validate the form and build the request body.
    ///
    /// # Errors
    /// Returns [`FormErrors`] listing every field that failed.
    pub fn validate(&self) -> Result<PropertyPayload, FormErrors> {
        let mut errors = Vec::new();
        let mut fail = |field: &'static str, message: String| {
            errors.push(FieldError { field, message });
        };

        let title = self.title.trim();
        if let Some(message) = length_message("Title", title, TITLE_CHARS) {
            fail("title", message);
        }
        let location = self.location.trim();
        if let Some(message) = length_message("Location", location, LOCATION_CHARS) {
            fail("location", message);
        }

        let price = match money::parse_major(&self.price) {
            Ok(minor) if minor >= MIN_PRICE_MINOR => minor,
            Ok(_) => {
                fail("price", "Price must be at least 0.01".to_owned());
                0
            }
            Err(err) => {
                fail("price", err.to_string());
                0
            }
        };

        let currency = self.currency.trim().to_ascii_uppercase();
        if currency.chars().count() != 3 {
            fail(
                "currency",
                "Currency must be a 3-character ISO code (e.g., USD, EUR)".to_owned(),
            );
        } else if !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            fail("currency", "Currency must contain only letters".to_owned());
        }

        if self.bedrooms < 1 {
            fail("bedrooms", "Must have at least 1 bedroom".to_owned());
        }
        if self.bathrooms < 1 {
            fail("bathrooms", "Must have at least 1 bathroom".to_owned());
        }
        if self.status.is_none() {
            fail(
                "status",
                "Status must be either \"available\" or \"sold\"".to_owned(),
            );
        }

        match (errors.is_empty(), self.status) {
            (true, Some(status)) => Ok(PropertyPayload {
                title: title.to_owned(),
                amount: Amount { price, currency },
                location: location.to_owned(),
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                status,
            }),
            _ => Err(FormErrors(errors)),
        }
    }
}

fn length_message(label: &str, value: &str, (min, max): (usize, usize)) -> Option<String> {
    let count = value.chars().count();
    if count < min {
        Some(format!("{label} must be at least {min} characters"))
    } else if count > max {
        Some(format!("{label} must not exceed {max} characters"))
    } else {
        None
    }
}
