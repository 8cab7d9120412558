//! Client error handling

use domain_simulation::ApiError;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors returned by `SimulationsClient`
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with one of its known error classes
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The API answered with a status the call did not expect
    #[error("{method} {url}: expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        method: Method,
        url: String,
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    /// The API answered a call that accepts any 2xx with a non-success status
    #[error("{method} {url}: expected a 2xx status, got {actual}: {body}")]
    UnsuccessfulStatus {
        method: Method,
        url: String,
        actual: StatusCode,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ClientError {
    /// The typed API error, if the failure was one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(error) => Some(error),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api(error) => StatusCode::from_u16(error.status()).ok(),
            ClientError::UnexpectedStatus { actual, .. }
            | ClientError::UnsuccessfulStatus { actual, .. } => Some(*actual),
            ClientError::Transport(error) => error.status(),
            _ => None,
        }
    }
}
