//! Error types for the envimix variant generator.

use crate::document::GateCollection;
use std::path::PathBuf;
use thiserror::Error;

/// Generation-related errors. All of them are fatal for the running sequence.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error(
        "Gate invariant violated in {collection}: {live} live gate identifiers, {captured} captured"
    )]
    InvariantViolation {
        collection: GateCollection,
        live: usize,
        captured: usize,
    },

    #[error("Unknown validation mode: {0} (must be 'none', 'fake' or 'real')")]
    UnreachablePolicy(String),

    #[error("Map UID {0:?} is too short to derive variant UIDs from")]
    MalformedUid(String),

    #[error("Invalid map name template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
}

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to encode document {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode document {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors surfaced by the CLI and the config layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No maps found under {0}")]
    NoInput(PathBuf),

    #[error("Failed to encode report: {0}")]
    ReportEncoding(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
