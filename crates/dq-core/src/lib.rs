//! dq-core - Core library for dqflow
//!
//! This crate provides the coded error type, the registry of bundled dbt
//! template files, idempotent filesystem materialization helpers, and the
//! BigQuery connection configuration that renders `profiles.yml`.

pub mod connection;
pub mod error;
pub mod templates;

pub use connection::{AuthMethod, ConnectionConfig, DEFAULT_ENVIRONMENT_TARGET};
pub use error::{CoreError, CoreResult};
pub use templates::{
    ensure_dir, template_content, template_relative_path, write_template_if_missing,
    TEMPLATE_FILE_LOCATIONS,
};
