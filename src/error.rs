// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Missing required environment variable {0}")]
    MissingVariable(&'static str),

    #[error("Invalid value {value:?} for {name}: expected one of true, false, 1, 0")]
    InvalidFlag { name: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}: {body}")]
    ApiStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected response from {url}: {message}")]
    ResponseFormat { url: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SyncError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
