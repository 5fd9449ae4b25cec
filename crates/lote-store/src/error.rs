//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The API answered with a non-success status.
    #[error("api returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The local outbox could not be written or read.
    #[error("failed to {operation} outbox file {path}")]
    Outbox {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote and local persistence both failed for one record; only this
    /// becomes a row error.
    #[error("remote and local persistence both failed: {remote}; {local}")]
    BothTiersFailed {
        remote: Box<StoreError>,
        local: Box<StoreError>,
    },
}
