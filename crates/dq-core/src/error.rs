//! Error types for dq-core

use thiserror::Error;

/// Core error type for dqflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Working directory missing and creation disallowed
    #[error("[E001] Working directory does not exist: {path}. Re-run with path creation enabled or create it manually.")]
    WorkingDirMissing { path: String },

    /// E002: Expiration placeholder could not be substituted
    #[error("[E002] Failed to set intermediate table expiration to {hours} hours in {path}: the descriptor carries neither the expiration placeholder nor the requested value")]
    ExpirationNotSet { hours: u32, path: String },

    /// E003: Template name not present in the registry
    #[error("[E003] Unknown template file: {name}")]
    UnknownTemplate { name: String },

    /// E004: IO error with file path context
    #[error("[E004] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E005: IO error
    #[error("[E005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile template render error
    #[error("[E006] Failed to render connection profile: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
