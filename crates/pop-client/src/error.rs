//! Error types for pop-client

use thiserror::Error;

/// Errors surfaced to the viewer
#[derive(Error, Debug)]
pub enum ClientError {
    /// V001: Network or decode failure
    #[error("[V001] Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// V002: The service answered with an empty dataset
    #[error("[V002] No data available")]
    NoData,

    /// V003: The service answered with a non-success status
    #[error("[V003] Unexpected response status {0}")]
    Status(u16),
}

/// Result type alias for ClientError
pub type ClientResult<T> = Result<T, ClientError>;
