//! Error types for the property client.
//!
//! [`ClientError`] separates "the server answered with a failure" from "no
//! answer arrived", which is what the retry policy keys on. [`LayoutError`]
//! covers the column layout and its local storage.

use camino::Utf8PathBuf;
use thiserror::Error;

const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Failures raised while calling the property API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope.
        message: String,
    },
    /// No response arrived (connection refused, reset, DNS failure).
    #[error("no response from server: {message}")]
    Transport {
        /// Transport error description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Timeout description.
        message: String,
    },
    /// The response body was not the expected envelope.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
    /// The client was configured or called with unusable values.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// What was wrong.
        message: String,
    },
}

impl ClientError {
    /// Whether a later attempt could succeed: transport failures, timeouts
    /// and 5xx responses. Client errors (4xx) are final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Server { status, .. } => *status >= 500 && *status < 600,
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Decode { .. } | Self::Configuration { .. } => false,
        }
    }

    /// HTTP status of a server failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to a person.
    ///
    /// Server failures surface the envelope message verbatim; anything that
    /// never reached the server gets a generic connectivity hint.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Transport { .. } | Self::Timeout { .. } => NO_RESPONSE_MESSAGE.to_owned(),
            Self::Decode { .. } => UNEXPECTED_MESSAGE.to_owned(),
            Self::Configuration { message } => message.clone(),
        }
    }
}

/// Failures raised by column layout edits and their local storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The key does not name a known column.
    #[error("unknown column: {key}")]
    UnknownColumn {
        /// Offending key.
        key: String,
    },
    /// The column cannot be hidden.
    #[error("column cannot be hidden: {key}")]
    Locked {
        /// Offending key.
        key: String,
    },
    /// Reading or writing the storage file failed.
    #[error("storage I/O failed at {path}: {message}")]
    Io {
        /// File or directory involved.
        path: Utf8PathBuf,
        /// I/O error description.
        message: String,
    },
    /// Stored content could not be encoded or decoded.
    #[error("storage content is invalid: {message}")]
    Encoding {
        /// Serde error description.
        message: String,
    },
}
