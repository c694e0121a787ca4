//! Listing state container.
//!
//! [`PropertyStore`] is the single owner of the listing screen's state.
//! Consumers read snapshots or subscribe to changes; only store methods
//! mutate. Mutations are not applied optimistically: a successful create,
//! update or delete refetches the current page with the current filters.
//!
//! Every fetch is stamped with a sequence number. When a response arrives
//! after a newer fetch was issued it is dropped, so quick page or search
//! changes cannot be overwritten by a slow earlier answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pagination::{DEFAULT_PAGE, DEFAULT_TAKE, PageMeta, PageRequest};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::PropertyApi;
use crate::error::ClientError;
use crate::model::{ListQuery, Property, PropertyPayload};

/// Snapshot of the listing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// Records on the current page.
    pub items: Vec<Property>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message of the last failure, if not cleared.
    pub error: Option<String>,
    /// Metadata of the last successful fetch.
    pub meta: Option<PageMeta>,
    /// One-based page requested.
    pub current_page: u32,
    /// Page size requested.
    pub items_per_page: u32,
    /// Search text as entered.
    pub search_query: String,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            meta: None,
            current_page: DEFAULT_PAGE,
            items_per_page: DEFAULT_TAKE,
            search_query: String::new(),
        }
    }
}

/// Observable listing state driven by a [`PropertyApi`].
pub struct PropertyStore {
    api: Arc<dyn PropertyApi>,
    state: watch::Sender<ListingState>,
    latest_fetch: AtomicU64,
}

impl PropertyStore {
    /// Store in the initial state.
    #[must_use]
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        let (state, _) = watch::channel(ListingState::default());
        Self {
            api,
            state,
            latest_fetch: AtomicU64::new(0),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> ListingState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListingState> {
        self.state.subscribe()
    }

    /// Fetch the current page with the current filters.
    ///
    /// # Errors
    /// Returns the failure that was also recorded in `error`. A response
    /// overtaken by a newer fetch is discarded and reported as `Ok`.
    pub async fn fetch(&self) -> Result<(), ClientError> {
        let ticket = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut page = Ok(PageRequest::default());
        let mut search = String::new();
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            page = PageRequest::new(state.current_page, state.items_per_page);
            search.clone_from(&state.search_query);
        });

        let outcome = match page {
            Ok(page) => self.api.list(&ListQuery::new(page, &search)).await,
            Err(err) => Err(ClientError::Configuration {
                message: err.to_string(),
            }),
        };

        if self.latest_fetch.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding stale listing response");
            return Ok(());
        }
        match outcome {
            Ok(page) => {
                self.state.send_modify(|state| {
                    state.items = page.data;
                    state.meta = Some(page.meta);
                    state.loading = false;
                });
                Ok(())
            }
            Err(error) => {
                self.state.send_modify(|state| {
                    state.error = Some(error.user_message());
                    state.loading = false;
                });
                Err(error)
            }
        }
    }

    /// Create a listing, then refetch.
    ///
    /// # Errors
    /// Returns the API failure; the listing is left untouched.
    pub async fn create(&self, payload: &PropertyPayload) -> Result<Property, ClientError> {
        self.clear_error();
        let created = self.record_failure(self.api.create(payload).await)?;
        self.refetch().await;
        Ok(created)
    }

    /// Replace the listing `id`, then refetch.
    ///
    /// # Errors
    /// Returns the API failure; the listing is left untouched.
    pub async fn update(
        &self,
        id: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ClientError> {
        self.clear_error();
        let updated = self.record_failure(self.api.update(id, payload).await)?;
        self.refetch().await;
        Ok(updated)
    }

    /// Delete the listing `id`, then refetch.
    ///
    /// # Errors
    /// Returns the API failure; the listing is left untouched.
    pub async fn delete(&self, id: &str) -> Result<Option<Property>, ClientError> {
        self.clear_error();
        let deleted = self.record_failure(self.api.delete(id).await)?;
        self.refetch().await;
        Ok(deleted)
    }

    /// Go to page `page` and refetch.
    ///
    /// # Errors
    /// See [`PropertyStore::fetch`].
    pub async fn set_page(&self, page: u32) -> Result<(), ClientError> {
        self.state.send_modify(|state| state.current_page = page);
        self.fetch().await
    }

    /// Change the page size, return to page 1 and refetch.
    ///
    /// # Errors
    /// See [`PropertyStore::fetch`].
    pub async fn set_items_per_page(&self, take: u32) -> Result<(), ClientError> {
        self.state.send_modify(|state| {
            state.items_per_page = take;
            state.current_page = DEFAULT_PAGE;
        });
        self.fetch().await
    }

    /// Change the search text, return to page 1 and refetch.
    ///
    /// # Errors
    /// See [`PropertyStore::fetch`].
    pub async fn set_search_query(&self, query: &str) -> Result<(), ClientError> {
        self.state.send_modify(|state| {
            query.clone_into(&mut state.search_query);
            state.current_page = DEFAULT_PAGE;
        });
        self.fetch().await
    }

    /// Forget the last failure.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Return to the initial state. Responses to fetches issued before the
    /// reset are discarded.
    pub fn reset(&self) {
        self.latest_fetch.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(ListingState::default());
    }

    fn record_failure<T>(&self, outcome: Result<T, ClientError>) -> Result<T, ClientError> {
        outcome.inspect_err(|error| {
            let message = error.user_message();
            self.state.send_modify(|state| state.error = Some(message));
        })
    }

    async fn refetch(&self) {
        if let Err(error) = self.fetch().await {
            warn!(%error, "refetch after mutation failed");
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
