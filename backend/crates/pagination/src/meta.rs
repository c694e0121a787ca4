//! Pagination metadata and the paginated result wrapper.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Metadata describing one page of a filtered result set.
///
/// Serialised in camelCase to match the listing envelope:
/// `{"totalItems":13,"itemCount":3,"itemsPerPage":10,"totalPages":2,"currentPage":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Size of the whole filtered set.
    pub total_items: u64,
    /// Number of records on this page.
    pub item_count: u64,
    /// Requested page size.
    pub items_per_page: u32,
    /// `ceil(total_items / items_per_page)`.
    pub total_pages: u64,
    /// One-based page number that was served.
    pub current_page: u32,
}

impl PageMeta {
    /// Derive metadata for a served page.
    ///
    /// `item_count` and `total_items` come from two independent reads, so a
    /// concurrent write may make them disagree; no reconciliation is done.
    #[must_use]
    pub fn new(request: PageRequest, item_count: usize, total_items: u64) -> Self {
        let take = request.take();
        Self {
            total_items,
            item_count: u64::try_from(item_count).unwrap_or(u64::MAX),
            items_per_page: take,
            total_pages: total_items.div_ceil(u64::from(take)),
            current_page: request.page(),
        }
    }

    /// Whether a page exists after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }
}

/// A page of records together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Records on the served page.
    pub data: Vec<T>,
    /// Metadata for the served page.
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Wrap a page of records, deriving metadata from the request and total.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let meta = PageMeta::new(request, data.len(), total_items);
        Self { data, meta }
    }

    /// Convert every record while keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
