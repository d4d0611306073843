//! Error types for sumo-collector-core

use std::time::Duration;

use thiserror::Error;

/// Main error type for the sumo-collector-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success HTTP response
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Transport failure other than a connect timeout
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// The transport gave up connecting; retried until the deadline
    #[error("connection timed out: {0}")]
    ConnectTimeout(String),

    /// The overall request deadline elapsed
    #[error("request did not complete within {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No collector registered under the configured name
    #[error("collector not found: {0}")]
    CollectorNotFound(String),

    /// Source has no etag to send with a conditional update
    #[error("no etag returned for source {0}")]
    MissingEtag(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the retry loop should try the request again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConnectTimeout(_))
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::ConnectTimeout(e.to_string())
        } else {
            Error::Http(e)
        }
    }
}

/// Result type alias for sumo-collector-core
pub type Result<T> = std::result::Result<T, Error>;
