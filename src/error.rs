//! Error types for Complichat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Complichat operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, backend API calls, document validation,
/// and session management.
#[derive(Error, Debug)]
pub enum ComplichatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors (connection failures, non-2xx responses, malformed bodies)
    #[error("Backend error: {0}")]
    Api(String),

    /// Validation failures rejected before any state mutation (e.g. wrong file type)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session state errors
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Complichat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
