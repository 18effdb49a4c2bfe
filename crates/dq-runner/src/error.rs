//! Error types for dq-runner

use thiserror::Error;

/// Runner error type for dqflow
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Path preparation or profile rendering failure
    #[error(transparent)]
    Core(#[from] dq_core::CoreError),

    /// R001: The dbt executable could not be launched
    #[error("[R001] Failed to launch 'dbt {command}': {source}. Is dbt installed and on PATH?")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// R002: dbt exited with a non-zero status
    #[error("[R002] 'dbt {command}' failed: {status}")]
    DbtFailed {
        command: String,
        status: std::process::ExitStatus,
    },
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
