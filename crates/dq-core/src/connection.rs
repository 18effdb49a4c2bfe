//! BigQuery connection configuration and profile rendering.
//!
//! The configuration never opens a warehouse connection itself; it only
//! renders the `profiles.yml` document the external dbt process reads.

use crate::error::{CoreError, CoreResult};
use crate::templates::template_content;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment target used when the caller does not supply one.
pub const DEFAULT_ENVIRONMENT_TARGET: &str = "dev";

/// Authentication method written into the rendered profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Explicit service-account key file
    ServiceAccount,
    /// Application-default credentials, optionally impersonating a
    /// service account
    Oauth,
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::ServiceAccount => write!(f, "service-account"),
            AuthMethod::Oauth => write!(f, "oauth"),
        }
    }
}

/// Warehouse identity and credentials for one dbt target.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// GCP project id billed for dbt-issued queries
    pub project_id: String,

    /// BigQuery dataset receiving the generated artifacts
    pub dataset_id: String,

    /// Worker threads for the external dbt process
    pub threads: usize,

    /// BigQuery region (e.g. EU, us-central1); omitted lines fall back to
    /// the dataset default
    pub region: Option<String>,

    /// Path to a service-account JSON key file
    pub service_account_key_path: Option<PathBuf>,

    /// Service account to impersonate via application-default credentials
    pub impersonation_credentials: Option<String>,
}

/// Template context for `profiles.yml`
#[derive(Serialize)]
struct ProfileContext<'a> {
    environment_target: &'a str,
    method: String,
    project_id: &'a str,
    dataset_id: &'a str,
    threads: usize,
    location: Option<&'a str>,
    keyfile: Option<String>,
    impersonate_service_account: Option<&'a str>,
}

impl ConnectionConfig {
    /// Resolve the authentication method from the supplied credentials.
    ///
    /// A key file wins over impersonation when both are present.
    pub fn auth_method(&self) -> AuthMethod {
        if self.service_account_key_path.is_some() {
            AuthMethod::ServiceAccount
        } else {
            AuthMethod::Oauth
        }
    }

    /// Render the profile document for `environment_target`.
    pub fn render_profiles_yml(&self, environment_target: &str) -> CoreResult<String> {
        let template = template_content("profiles.yml")?;
        let context = ProfileContext {
            environment_target,
            method: self.auth_method().to_string(),
            project_id: &self.project_id,
            dataset_id: &self.dataset_id,
            threads: self.threads,
            location: self.region.as_deref(),
            keyfile: self
                .service_account_key_path
                .as_ref()
                .map(|p| p.display().to_string()),
            impersonate_service_account: self.impersonation_credentials.as_deref(),
        };
        let env = Environment::new();
        Ok(env.render_str(template, context)?)
    }

    /// Render and persist `profiles.yml` under `target_directory`.
    ///
    /// Returns the path of the written profile file.
    pub fn to_profiles_yml(
        &self,
        target_directory: &Path,
        environment_target: &str,
    ) -> CoreResult<PathBuf> {
        let rendered = self.render_profiles_yml(environment_target)?;
        let path = target_directory.join("profiles.yml");
        log::debug!("Writing connection profile to: {}", path.display());
        fs::write(&path, rendered).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
