//! Typed failures for the collaborators around the text pipeline.
//!
//! The pipeline itself never fails: empty or missing text degrades to empty
//! views. Everything that can go wrong happens before it (fetching the
//! article, reading configuration) or after it (asking the completion API),
//! and each of those surfaces its own error type so callers can tell them
//! apart.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to produce article text from a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid article URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("no element matching `{selector}` found at {url}")]
    MissingContainer { url: String, selector: String },
    #[error("invalid content selector `{0}`")]
    Selector(String),
}

/// Failure to get an answer from the completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured (set OPENAI_API_KEY or api.api_key)")]
    MissingApiKey,
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion API answered with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("completion API returned no choices")]
    EmptyResponse,
}

impl CompletionError {
    /// Transport failures, rate limiting and server errors are worth another
    /// attempt; everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Request(e) => !e.is_builder() && !e.is_decode(),
            CompletionError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            CompletionError::MissingApiKey
            | CompletionError::Decode(_)
            | CompletionError::EmptyResponse => false,
        }
    }
}

/// Failure to load the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
