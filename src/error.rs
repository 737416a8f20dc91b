//! Error types for the fallible library surfaces
//!
//! Render helpers and the inspector never fail; only loading configuration,
//! scenarios and storage files, or parsing attribution text, can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from config, storage and parsing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid attribution '{0}': expected FILE:LINE")]
    InvalidAttribution(String),

    #[error("Invalid attribution line in '{input}': {reason}")]
    InvalidLine { input: String, reason: String },

    #[error("Invalid element tree operation: {0}")]
    InvalidTree(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for srcspot operations
pub type Result<T> = std::result::Result<T, Error>;
