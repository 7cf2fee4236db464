//! # Error Handling
//!
//! This module defines the centralized error type for `registry-mirrors`.
//! It uses `thiserror` to derive an `Error` enum covering every failure the
//! library can report.
//!
//! Only the boundaries can fail: reading and parsing mirror policy files,
//! decoding pull-secret material, and writing rendered configuration to disk.
//! The merge pipeline itself (`path`, `mirrors`, `render`) is total and never
//! returns an `Error`.

use thiserror::Error;

/// Main error type for registry-mirrors operations
#[derive(Error, Debug)]
pub enum Error {
    /// A mirror policy document could not be interpreted.
    ///
    /// Includes an optional hint about how to fix the input.
    #[error("Policy parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the policy document
        hint: Option<String>,
    },

    /// The pull secret was not a registry-credentials document or a Secret
    /// carrying one.
    #[error("Pull secret error: {message}")]
    PullSecret { message: String },

    /// An error occurred while writing or pruning rendered configuration.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 payload in a Secret could not be decoded.
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
