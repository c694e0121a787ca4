//! Client for the property listing API.
//!
//! The crate mirrors what a listing screen needs from the backend:
//!
//! - [`api`] talks HTTP through [`api::HttpPropertyApi`], with a request
//!   timeout and the exponential [`retry::RetryPolicy`].
//! - [`store::PropertyStore`] holds the listing state, refetches after every
//!   successful mutation and drops responses overtaken by a newer fetch.
//! - [`form`] and [`money`] validate user input and convert prices between
//!   major-unit text and integer minor units.
//! - [`debounce::SearchDebouncer`] rate-limits search keystrokes.
//! - [`columns`] and [`local_store`] keep the table column layout on disk.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use property_client::api::HttpPropertyApi;
//! use property_client::config::ClientSettings;
//! use property_client::store::PropertyStore;
//!
//! # async fn run(settings: ClientSettings) -> Result<(), property_client::ClientError> {
//! let api = HttpPropertyApi::from_settings(&settings)?;
//! let store = PropertyStore::new(Arc::new(api));
//! store.set_search_query("cairo").await?;
//! println!("{} matches", store.snapshot().items.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod columns;
pub mod config;
pub mod debounce;
pub mod error;
pub mod form;
pub mod local_store;
pub mod model;
pub mod money;
pub mod retry;
pub mod store;

pub use error::{ClientError, LayoutError};
