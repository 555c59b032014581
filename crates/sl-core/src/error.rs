//! Error types for sl-core

use thiserror::Error;

/// Core error type for SchemaLift
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Config/YAML parse error
    #[error("[E003] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E004: IO error
    #[error("[E004] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
