//! Pagination validation failures.

use thiserror::Error;

/// Errors raised when a page request violates its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The page number was below one.
    #[error("page must be at least 1, got {page}")]
    InvalidPage {
        /// Rejected page number.
        page: u32,
    },
    /// The page size was outside `1..=max`.
    #[error("take must be between 1 and {max}, got {take}")]
    InvalidTake {
        /// Rejected page size.
        take: u32,
        /// Largest accepted page size.
        max: u32,
    },
}
