//! Error types for the blump batch pipeline.
//!
//! Errors are organized by stage so that directory-level reports carry the
//! relevant context (file paths, stage names, specific issues). Undecodable
//! capture files are deliberately not represented here: they are skipped at
//! the point of decoding and never cross a stage boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for blump operations.
#[derive(Error, Debug)]
pub enum BlumpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
///
/// Every variant aborts the rest of the directory it occurred in; none of
/// them aborts the batch.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Capture file name does not match the `<base> <token> <ordinal>.<ext>` shape
    #[error("Unrecognized capture name {name:?}: {message}")]
    Naming { name: String, message: String },

    /// Crop window invalid for the given capture dimensions
    #[error("Crop window invalid for {path} ({width}x{height}): {message}")]
    Crop {
        path: PathBuf,
        width: u32,
        height: u32,
        message: String,
    },

    /// Failed to write a composed asset
    #[error("Failed to write composite {path}: {message}")]
    Persist { path: PathBuf, message: String },

    /// Failed to remove a source capture after its composite was written
    #[error("Failed to remove source {path}: {message}")]
    Cleanup { path: PathBuf, message: String },

    /// Failed to write a directory's manifest
    #[error("Failed to write manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Failed to list a directory's entries
    #[error("Failed to read directory {path}: {message}")]
    ReadDir { path: PathBuf, message: String },
}

/// Convenience type alias for blump results.
pub type Result<T> = std::result::Result<T, BlumpError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
