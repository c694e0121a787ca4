//! MongoDB connection handle, index bootstrap and health probe.

use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{Client, Database, IndexModel};
use tracing::{info, warn};

use crate::domain::ports::{StoreHealth, StoreProbe};

use super::documents::PropertyDocument;
use super::mongo_property_repository::{MongoPropertyRepository, PROPERTIES_COLLECTION};

/// Errors raised while opening or preparing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string was rejected or the server was unreachable.
    #[error("failed to connect to MongoDB: {message}")]
    Connect {
        /// Driver message.
        message: String,
    },
    /// Index creation failed.
    #[error("failed to create indexes: {message}")]
    Index {
        /// Driver message.
        message: String,
    },
}

/// Connected MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to `uri` and select `database`, verifying the server with a
    /// ping.
    ///
    /// # Errors
    /// Returns [`StoreError::Connect`] when the URI is invalid or the server
    /// does not answer.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|err| StoreError::Connect {
                message: err.to_string(),
            })?;
        let store = Self {
            database: client.database(database),
        };
        store.ping().await.map_err(|message| StoreError::Connect { message })?;
        info!(database, "connected to MongoDB");
        Ok(store)
    }

    async fn ping(&self) -> Result<(), String> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    /// Create the listing indexes: `title`, `status`, `location` and
    /// `createdAt` descending. Existing indexes are left untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::Index`] when the server rejects an index.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = |keys: Document| IndexModel::builder().keys(keys).build();
        let models = vec![
            index(doc! { "title": 1 }),
            index(doc! { "status": 1 }),
            index(doc! { "location": 1 }),
            index(doc! { "createdAt": -1 }),
        ];
        self.database
            .collection::<PropertyDocument>(PROPERTIES_COLLECTION)
            .create_indexes(models)
            .await
            .map_err(|err| StoreError::Index {
                message: err.to_string(),
            })?;
        Ok(())
    }

    /// Repository over the `properties` collection.
    pub fn property_repository(&self) -> MongoPropertyRepository {
        MongoPropertyRepository::new(self.database.collection(PROPERTIES_COLLECTION))
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn probe(&self) -> StoreProbe {
        match self.ping().await {
            Ok(()) => StoreProbe::connected(),
            Err(cause) => {
                warn!(error = %cause, "MongoDB ping failed");
                StoreProbe::disconnected(cause)
            }
        }
    }
}
