//! Core error types for lifeos-core.
//!
//! The scoring, streak and date functions are total and never fail. Errors
//! only come from the edges: parsing raw strings, loading configuration and
//! snapshots, and repository lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifeos-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Repository errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised at the boundary, before any computation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A completion date that is not `YYYY-MM-DD`
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Thought content was empty after trimming
    #[error("Content is required")]
    EmptyContent,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Repository errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Lookup by id found nothing
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Snapshot document could not be used
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
