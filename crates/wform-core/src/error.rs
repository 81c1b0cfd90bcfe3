//! Errors for schema and configuration decoding.

use thiserror::Error;

/// A webform schema could not be decoded.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid webform schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Form configuration is malformed or incomplete.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid form config: {0}")]
    Json(#[from] serde_json::Error),
    /// No submission endpoint was configured.
    #[error("form config has no endpoint")]
    MissingEndpoint,
}
