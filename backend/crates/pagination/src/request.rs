//! Page request value object.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PaginationError;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_TAKE: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_TAKE: u32 = 100;

/// Validated one-based page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= take <= MAX_TAKE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    take: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    take: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.take)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            take: DEFAULT_TAKE,
        }
    }
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page` is zero or `take` falls
    /// outside `1..=MAX_TAKE`.
    pub const fn new(page: u32, take: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidPage { page });
        }
        if take < 1 || take > MAX_TAKE {
            return Err(PaginationError::InvalidTake {
                take,
                max: MAX_TAKE,
            });
        }
        Ok(Self { page, take })
    }

    /// Build a request from optional query values, applying the defaults.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when a supplied value is out of range.
    pub fn from_optional(page: Option<u32>, take: Option<u32>) -> Result<Self, PaginationError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), take.unwrap_or(DEFAULT_TAKE))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn take(&self) -> u32 {
        self.take
    }

    /// Number of records to skip before the requested page starts.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.take as u64
    }

    /// Same page size, different page.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPage`] when `page` is zero.
    pub const fn with_page(self, page: u32) -> Result<Self, PaginationError> {
        Self::new(page, self.take)
    }

    /// Append `page` and `take` query parameters to `url`.
    pub fn append_to_url(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string())
            .append_pair("take", &self.take.to_string());
    }
}
