//! Listing filters: pagination plus an optional free-text search.

use std::cmp::Ordering;

use pagination::{PageRequest, PaginationError};

use super::Property;

/// Longest accepted search term, in characters.
pub const SEARCH_MAX_CHARS: usize = 100;

/// Validation failures raised while building a [`PropertyFilter`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    /// Page or page size out of range.
    #[error(transparent)]
    Page(#[from] PaginationError),
    /// Search term longer than [`SEARCH_MAX_CHARS`].
    #[error("search must be at most {max} characters")]
    SearchTooLong {
        /// Maximum length.
        max: usize,
        /// Observed length after trimming.
        actual: usize,
    },
}

impl ListingValidationError {
    /// Query parameter the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Page(PaginationError::InvalidPage { .. }) => "page",
            Self::Page(PaginationError::InvalidTake { .. }) => "take",
            Self::SearchTooLong { .. } => "search",
        }
    }
}

/// Trimmed, non-blank search text matched literally against title and
/// location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Interpret raw search input. Blank input means "no search".
    ///
    /// # Errors
    /// Returns [`ListingValidationError::SearchTooLong`] when the trimmed
    /// input exceeds [`SEARCH_MAX_CHARS`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SearchTerm;
    ///
    /// assert_eq!(SearchTerm::parse("   ").expect("blank is fine"), None);
    /// let term = SearchTerm::parse(" Cairo ").expect("valid").expect("present");
    /// assert!(term.matches("Flat", "New Cairo"));
    /// ```
    pub fn parse(raw: &str) -> Result<Option<Self>, ListingValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let actual = trimmed.chars().count();
        if actual > SEARCH_MAX_CHARS {
            return Err(ListingValidationError::SearchTooLong {
                max: SEARCH_MAX_CHARS,
                actual,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// The search text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive literal containment in either field.
    pub fn matches(&self, title: &str, location: &str) -> bool {
        let needle = self.0.to_lowercase();
        title.to_lowercase().contains(&needle) || location.to_lowercase().contains(&needle)
    }
}

/// Validated listing query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyFilter {
    /// Requested page.
    pub page: PageRequest,
    /// Optional search restriction.
    pub search: Option<SearchTerm>,
}

impl PropertyFilter {
    /// Validate raw query values, applying defaults for absent ones.
    ///
    /// # Errors
    /// Returns [`ListingValidationError`] for out-of-range paging values or an
    /// over-long search term.
    pub fn from_query(
        page: Option<u32>,
        take: Option<u32>,
        search: Option<&str>,
    ) -> Result<Self, ListingValidationError> {
        let page = PageRequest::from_optional(page, take)?;
        let search = match search {
            Some(raw) => SearchTerm::parse(raw)?,
            None => None,
        };
        Ok(Self { page, search })
    }

    /// Whether `property` belongs to the filtered set, ignoring pagination.
    pub fn admits(&self, property: &Property) -> bool {
        self.search
            .as_ref()
            .is_none_or(|term| term.matches(&property.title, &property.location))
    }
}

/// Listing order: newest first, ties broken by id descending.
pub fn newest_first(a: &Property, b: &Property) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some(3), None, 3, 10)]
    #[case(None, Some(100), 1, 100)]
    fn query_defaults_are_applied(
        #[case] page: Option<u32>,
        #[case] take: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_take: u32,
    ) {
        let filter = PropertyFilter::from_query(page, take, None).expect("valid filter");
        assert_eq!(filter.page.page(), expected_page);
        assert_eq!(filter.page.take(), expected_take);
        assert!(filter.search.is_none());
    }

    #[rstest]
    #[case(Some(0), None, "page")]
    #[case(None, Some(0), "take")]
    #[case(None, Some(101), "take")]
    fn out_of_range_paging_is_rejected(
        #[case] page: Option<u32>,
        #[case] take: Option<u32>,
        #[case] field: &str,
    ) {
        let err = PropertyFilter::from_query(page, take, None).expect_err("rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn blank_search_counts_as_absent() {
        let filter = PropertyFilter::from_query(None, None, Some("  \t ")).expect("valid");
        assert!(filter.search.is_none());
    }

    #[rstest]
    fn over_long_search_is_rejected() {
        let raw = "x".repeat(SEARCH_MAX_CHARS + 1);
        let err = PropertyFilter::from_query(None, None, Some(&raw)).expect_err("too long");
        assert_eq!(
            err,
            ListingValidationError::SearchTooLong {
                max: SEARCH_MAX_CHARS,
                actual: SEARCH_MAX_CHARS + 1,
            }
        );
    }

    #[rstest]
    #[case("villa", "Sea VILLA", "Hurghada", true)]
    #[case("hurg", "Sea villa", "Hurghada", true)]
    #[case("a.b", "aXb", "Somewhere", false)]
    #[case("a.b", "a.b street", "Somewhere", true)]
    #[case("cairo", "Flat", "Giza", false)]
    fn search_matches_title_or_location_literally(
        #[case] term: &str,
        #[case] title: &str,
        #[case] location: &str,
        #[case] expected: bool,
    ) {
        let term = SearchTerm::parse(term).expect("valid").expect("present");
        assert_eq!(term.matches(title, location), expected);
    }
}
