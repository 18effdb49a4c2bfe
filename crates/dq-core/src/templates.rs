//! Registry of bundled dbt template files and idempotent materialization
//! helpers.
//!
//! The registry is a fixed table mapping a logical file name to its relative
//! path under the dbt working directory. Template bodies are compiled into
//! the binary; requesting a name outside the table is a hard error.

use crate::error::{CoreError, CoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Logical template name → relative path under the dbt working directory.
pub const TEMPLATE_FILE_LOCATIONS: &[(&str, &str)] = &[
    ("profiles.yml", "profiles.yml"),
    ("dbt_project.yml", "dbt_project.yml"),
    ("main.sql", "models/data_quality_engine/main.sql"),
    ("dq_summary.sql", "models/data_quality_engine/dq_summary.sql"),
];

/// The expiration line shipped verbatim in the bundled project descriptor.
pub const HOURS_TO_EXPIRATION_PLACEHOLDER: &str = "+hours_to_expiration: 24";

/// Key half of the expiration line, used when substituting a caller value.
pub const HOURS_TO_EXPIRATION_KEY: &str = "+hours_to_expiration";

/// Look up the bundled content for a registered template name.
pub fn template_content(name: &str) -> CoreResult<&'static str> {
    match name {
        "profiles.yml" => Ok(include_str!("../templates/profiles.yml")),
        "dbt_project.yml" => Ok(include_str!("../templates/dbt_project.yml")),
        "main.sql" => Ok(include_str!("../templates/main.sql")),
        "dq_summary.sql" => Ok(include_str!("../templates/dq_summary.sql")),
        _ => Err(CoreError::UnknownTemplate {
            name: name.to_string(),
        }),
    }
}

/// Look up the relative path for a registered template name.
pub fn template_relative_path(name: &str) -> CoreResult<PathBuf> {
    TEMPLATE_FILE_LOCATIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rel)| PathBuf::from(rel))
        .ok_or_else(|| CoreError::UnknownTemplate {
            name: name.to_string(),
        })
}

/// Create a directory (and parents) if it does not already exist.
pub fn ensure_dir(path: &Path) -> CoreResult<()> {
    if !path.is_dir() {
        log::debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// Write the bundled template named by the file's final component to `path`,
/// unless a file is already present there. Existing content is preserved.
pub fn write_template_if_missing(path: &Path) -> CoreResult<()> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CoreError::UnknownTemplate {
            name: path.display().to_string(),
        })?;
    let content = template_content(name)?;
    if path.is_file() {
        log::debug!("Keeping existing file: {}", path.display());
        return Ok(());
    }
    log::debug!("Writing templated file to: {}", path.display());
    fs::write(path, content).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
