//! Property API port and its reqwest-backed adapter.
//!
//! The adapter owns transport details only: URL building, timeout, retry,
//! HTTP error mapping and envelope decoding.

use std::time::Duration;

use async_trait::async_trait;
use pagination::Paginated;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientSettings;
use crate::error::ClientError;
use crate::model::{
    Envelope, ErrorBody, ListQuery, Property, PropertyPayload, PropertyStatistics,
};
use crate::retry::RetryPolicy;

const PROPERTIES: &str = "properties";
const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Operations the listing screen performs against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch one page of listings.
    async fn list(&self, query: &ListQuery) -> Result<Paginated<Property>, ClientError>;

    /// Create a listing.
    async fn create(&self, payload: &PropertyPayload) -> Result<Property, ClientError>;

    /// Replace the listing `id`.
    async fn update(&self, id: &str, payload: &PropertyPayload) -> Result<Property, ClientError>;

    /// Delete the listing `id`.
    ///
    /// Returns the removed record when the server echoes it; a bare success
    /// envelope yields `None`.
    async fn delete(&self, id: &str) -> Result<Option<Property>, ClientError>;

    /// Fetch collection statistics.
    async fn statistics(&self) -> Result<PropertyStatistics, ClientError>;
}

/// [`PropertyApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPropertyApi {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpPropertyApi {
    /// Build an adapter with an explicit timeout and retry policy.
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] when the URL cannot carry a path
    /// or the HTTP client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, retry: RetryPolicy) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration {
                message: format!("api_url {base_url} cannot carry a path"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Configuration {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Build an adapter from [`ClientSettings`].
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`] for an unusable URL.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(
            settings.api_url()?,
            settings.timeout(),
            settings.retry_policy(),
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<T, B>(&self, build: B) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Fn() -> RequestBuilder,
    {
        self.retry
            .run(|| {
                let request = build();
                async move {
                    let response = request.send().await.map_err(map_transport_error)?;
                    decode_envelope(response).await
                }
            })
            .await
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn list(&self, query: &ListQuery) -> Result<Paginated<Property>, ClientError> {
        let mut url = self.endpoint(&[PROPERTIES]);
        query.page.append_to_url(&mut url);
        if let Some(search) = &query.search {
            url.query_pairs_mut().append_pair("search", search);
        }
        debug!(%url, "listing properties");
        let envelope = self
            .execute::<Vec<Property>, _>(|| self.client.get(url.clone()))
            .await?;
        let meta = envelope.meta.ok_or_else(|| ClientError::Decode {
            message: "listing response carried no meta".to_owned(),
        })?;
        Ok(Paginated {
            data: require_data(envelope.data)?,
            meta,
        })
    }

    async fn create(&self, payload: &PropertyPayload) -> Result<Property, ClientError> {
        let url = self.endpoint(&[PROPERTIES]);
        let envelope = self
            .execute(|| self.client.post(url.clone()).json(payload))
            .await?;
        require_data(envelope.data)
    }

    async fn update(&self, id: &str, payload: &PropertyPayload) -> Result<Property, ClientError> {
        let url = self.endpoint(&[PROPERTIES, id]);
        let envelope = self
            .execute(|| self.client.put(url.clone()).json(payload))
            .await?;
        require_data(envelope.data)
    }

    async fn delete(&self, id: &str) -> Result<Option<Property>, ClientError> {
        let url = self.endpoint(&[PROPERTIES, id]);
        let envelope = self.execute(|| self.client.delete(url.clone())).await?;
        Ok(envelope.data)
    }

    async fn statistics(&self) -> Result<PropertyStatistics, ClientError> {
        let url = self.endpoint(&[PROPERTIES, "statistics"]);
        let envelope = self.execute(|| self.client.get(url.clone())).await?;
        require_data(envelope.data)
    }
}

fn require_data<T>(data: Option<T>) -> Result<T, ClientError> {
    data.ok_or_else(|| ClientError::Decode {
        message: "response envelope carried no data".to_owned(),
    })
}

async fn decode_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<Envelope<T>, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout {
            message: error.to_string(),
        }
    } else {
        ClientError::Transport {
            message: error.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned());
    ClientError::Server {
        status: status.as_u16(),
        message,
    }
}
