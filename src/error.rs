// src/error.rs
// Error types for the FinHealth client

use thiserror::Error;

/// Failures talking to the pricing backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

/// Failures loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures the chat session reports to its caller instead of the log
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,

    #[error("empty message")]
    EmptyMessage,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
