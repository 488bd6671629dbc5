//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("API request failed with status: {status}")]
    RequestFailed { status: u16 },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures the request executor is allowed to retry.
    ///
    /// Only non-success HTTP statuses qualify; transport-level errors mean
    /// the request never completed and must surface to the caller at once.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RequestFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
