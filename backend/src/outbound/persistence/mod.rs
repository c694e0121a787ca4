//! MongoDB persistence adapters.
//!
//! The adapter is a thin translator between BSON documents and domain types;
//! no business logic resides here.
//!
//! - **Internal documents**: `documents.rs` holds the serde shape of a stored
//!   property. It never leaves this module.
//! - **Strongly typed errors**: driver failures are mapped to
//!   [`PropertyRepositoryError`](crate::domain::ports::PropertyRepositoryError)
//!   variants.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::MongoStore;
//!
//! # async fn run() -> Result<(), backend::outbound::persistence::StoreError> {
//! let store = MongoStore::connect("mongodb://localhost:27017", "minicrm").await?;
//! store.ensure_indexes().await?;
//! let _repo = store.property_repository();
//! # Ok(())
//! # }
//! ```

mod documents;
mod mongo_error_mapping;
mod mongo_property_repository;
mod store;

pub use mongo_property_repository::{MongoPropertyRepository, PROPERTIES_COLLECTION};
pub use store::{MongoStore, StoreError};
