//! Exact conversion between major-unit price text and integer minor units.
//!
//! Prices never pass through floating point: `"12.34"` is parsed digit by
//! digit into `1234` and formatted back the same way.

use thiserror::Error;

use crate::model::Amount;

const MINOR_PER_MAJOR: u64 = 100;
const MAX_FRACTION_DIGITS: usize = 2;

/// Raised when price text is not a non-negative decimal with at most two
/// fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Nothing was entered.
    #[error("Price is required")]
    Empty,
    /// The text is not a plain decimal number.
    #[error("Price must be a number")]
    NotANumber {
        /// Text as entered.
        input: String,
    },
    /// More than two fractional digits.
    #[error("Price must have at most two decimal places")]
    TooPrecise {
        /// Text as entered.
        input: String,
    },
    /// The value does not fit in minor units.
    #[error("Price is too large")]
    Overflow {
        /// Text as entered.
        input: String,
    },
}

/// Parse major-unit text into minor units.
///
/// # Examples
/// ```
/// use property_client::money::parse_major;
///
/// assert_eq!(parse_major("12.34"), Ok(1234));
/// assert_eq!(parse_major("12.3"), Ok(1230));
/// assert_eq!(parse_major("12"), Ok(1200));
/// ```
///
/// # Errors
/// Returns a [`MoneyError`] for empty, signed, non-numeric or over-precise
/// input.
pub fn parse_major(input: &str) -> Result<u64, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }
    let not_a_number = || MoneyError::NotANumber {
        input: input.to_owned(),
    };
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
        Some(_) => return Err(not_a_number()),
        None => (trimmed, ""),
    };
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return Err(not_a_number());
    }
    if fraction.len() > MAX_FRACTION_DIGITS {
        return Err(MoneyError::TooPrecise {
            input: input.to_owned(),
        });
    }

    let overflow = || MoneyError::Overflow {
        input: input.to_owned(),
    };
    let whole_minor = whole
        .parse::<u64>()
        .map_err(|_| overflow())?
        .checked_mul(MINOR_PER_MAJOR)
        .ok_or_else(overflow)?;
    whole_minor
        .checked_add(fraction_minor(fraction))
        .ok_or_else(overflow)
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

fn fraction_minor(fraction: &str) -> u64 {
    fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(MAX_FRACTION_DIGITS)
        .fold(0, |acc, digit| acc * 10 + u64::from(digit - b'0'))
}

/// Format minor units as major-unit text with two decimals.
///
/// ```
/// use property_client::money::format_minor;
///
/// assert_eq!(format_minor(1234), "12.34");
/// assert_eq!(format_minor(5), "0.05");
/// ```
#[must_use]
pub fn format_minor(minor: u64) -> String {
    format!(
        "{}.{:02}",
        minor.div_euclid(MINOR_PER_MAJOR),
        minor.rem_euclid(MINOR_PER_MAJOR)
    )
}

/// Format an amount for display, e.g. `USD 12.34`.
#[must_use]
pub fn format_amount(amount: &Amount) -> String {
    format!("{} {}", amount.currency, format_minor(amount.price))
}
