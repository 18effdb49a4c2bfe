//! dbt working directory preparation and run orchestration.
//!
//! Construction resolves `<base>/dbt`, materializes the project descriptor
//! and SQL model templates, creates the generated-artifact subdirectories,
//! and renders the connection profile. Every preparation step is idempotent,
//! so accessors and `run` re-trigger preparation freely without discarding
//! prior state.

use crate::error::RunnerResult;
use crate::invoker::{DbtCli, DbtInvocation, DbtInvoker};
use dq_core::templates::{
    ensure_dir, template_content, template_relative_path, write_template_if_missing,
    HOURS_TO_EXPIRATION_KEY, HOURS_TO_EXPIRATION_PLACEHOLDER,
};
use dq_core::{ConnectionConfig, CoreError, DEFAULT_ENVIRONMENT_TARGET};
use std::fs;
use std::path::{Path, PathBuf};

/// Construction parameters for [`DbtRunner`].
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// GCP project id billed for dbt-issued queries
    pub gcp_project_id: String,

    /// BigQuery dataset receiving the generated artifacts
    pub gcp_bq_dataset_id: String,

    /// Profile target name; `None` falls back to the default target
    pub environment_target: Option<String>,

    /// BigQuery region (e.g. EU, us-central1)
    pub gcp_region_id: Option<String>,

    /// Path to a service-account JSON key file
    pub gcp_service_account_key_path: Option<PathBuf>,

    /// Service account to impersonate via application-default credentials
    pub gcp_impersonation_credentials: Option<String>,

    /// Expiration applied to intermediate dbt tables, in hours
    pub intermediate_table_expiration_hours: u32,

    /// Worker threads for the external dbt process
    pub num_threads: usize,

    /// Directory under which the `dbt` working directory is resolved;
    /// `None` uses the process working directory
    pub base_dir: Option<PathBuf>,

    /// Create the working directory when absent instead of failing
    pub create_paths_if_not_exists: bool,
}

impl RunnerOptions {
    /// Options for the given warehouse identity with default settings:
    /// 24-hour expiration, one thread, path creation enabled.
    pub fn new(gcp_project_id: impl Into<String>, gcp_bq_dataset_id: impl Into<String>) -> Self {
        Self {
            gcp_project_id: gcp_project_id.into(),
            gcp_bq_dataset_id: gcp_bq_dataset_id.into(),
            environment_target: None,
            gcp_region_id: None,
            gcp_service_account_key_path: None,
            gcp_impersonation_credentials: None,
            intermediate_table_expiration_hours: 24,
            num_threads: 1,
            base_dir: None,
            create_paths_if_not_exists: true,
        }
    }
}

/// Prepares a local dbt project and shells out to dbt.
pub struct DbtRunner {
    dbt_path: PathBuf,
    profiles_dir: PathBuf,
    environment_target: String,
    num_threads: usize,
    connection_config: ConnectionConfig,
    rule_binding_views_path: PathBuf,
    entity_summary_path: PathBuf,
    invoker: Box<dyn DbtInvoker>,
}

// Manual impl: the boxed invoker has no Debug bound.
impl std::fmt::Debug for DbtRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbtRunner")
            .field("dbt_path", &self.dbt_path)
            .field("profiles_dir", &self.profiles_dir)
            .field("environment_target", &self.environment_target)
            .field("num_threads", &self.num_threads)
            .field("connection_config", &self.connection_config)
            .finish_non_exhaustive()
    }
}

impl DbtRunner {
    /// Construct a runner backed by the dbt CLI on PATH.
    pub fn new(options: RunnerOptions) -> RunnerResult<Self> {
        Self::with_invoker(options, Box::new(DbtCli::new()))
    }

    /// Construct a runner with an explicit invoker (used by tests).
    pub fn with_invoker(
        options: RunnerOptions,
        invoker: Box<dyn DbtInvoker>,
    ) -> RunnerResult<Self> {
        let dbt_path = resolve_dbt_path(
            options.base_dir.as_deref(),
            options.create_paths_if_not_exists,
        )?;
        prepare_project_file(&dbt_path, options.intermediate_table_expiration_hours)?;
        prepare_model_files(&dbt_path)?;
        let rule_binding_views_path = prepare_rule_binding_view_path(&dbt_path)?;
        let entity_summary_path = prepare_entity_summary_path(&dbt_path)?;

        let mut runner = Self {
            profiles_dir: dbt_path.clone(),
            dbt_path,
            environment_target: String::new(),
            num_threads: options.num_threads,
            connection_config: ConnectionConfig {
                project_id: options.gcp_project_id,
                dataset_id: options.gcp_bq_dataset_id,
                threads: options.num_threads,
                region: options.gcp_region_id,
                service_account_key_path: options.gcp_service_account_key_path,
                impersonation_credentials: options.gcp_impersonation_credentials,
            },
            rule_binding_views_path,
            entity_summary_path,
            invoker,
        };
        let config = runner.connection_config.clone();
        runner.resolve_connection_configs(config, options.environment_target.as_deref())?;
        log::debug!("Using dbt profiles dir: {}", runner.profiles_dir.display());
        Ok(runner)
    }

    /// Invoke dbt with the supplied variables.
    ///
    /// When `debug` is set a connectivity test runs first. `dry_run`
    /// compiles the project without executing against the warehouse.
    pub async fn run(
        &self,
        vars: &serde_json::Map<String, serde_json::Value>,
        debug: bool,
        dry_run: bool,
    ) -> RunnerResult<()> {
        log::debug!("Running dbt in path: {}", self.dbt_path.display());
        if debug {
            self.test_connection().await?;
        }
        self.invoker
            .invoke(&DbtInvocation {
                project_dir: self.dbt_path.clone(),
                profiles_dir: self.profiles_dir.clone(),
                environment_target: self.environment_target.clone(),
                vars: vars.clone(),
                debug: false,
                dry_run,
            })
            .await
    }

    /// Invoke `dbt debug` to validate connectivity and credentials.
    pub async fn test_connection(&self) -> RunnerResult<()> {
        self.invoker
            .invoke(&DbtInvocation {
                project_dir: self.dbt_path.clone(),
                profiles_dir: self.profiles_dir.clone(),
                environment_target: self.environment_target.clone(),
                vars: serde_json::Map::new(),
                debug: true,
                dry_run: true,
            })
            .await
    }

    /// The resolved dbt working directory.
    ///
    /// Fails if the directory has disappeared since construction.
    pub fn dbt_path(&self) -> RunnerResult<&Path> {
        if !self.dbt_path.is_dir() {
            return Err(CoreError::WorkingDirMissing {
                path: self.dbt_path.display().to_string(),
            }
            .into());
        }
        Ok(&self.dbt_path)
    }

    /// Output directory for generated rule-binding views, recreated if
    /// missing.
    pub fn rule_binding_views_path(&self) -> RunnerResult<&Path> {
        ensure_dir(&self.rule_binding_views_path)?;
        Ok(&self.rule_binding_views_path)
    }

    /// Output directory for entity summary statistics, recreated if missing.
    pub fn entity_summary_path(&self) -> RunnerResult<&Path> {
        ensure_dir(&self.entity_summary_path)?;
        Ok(&self.entity_summary_path)
    }

    /// The environment target the profile is rendered for.
    pub fn environment_target(&self) -> &str {
        &self.environment_target
    }

    /// Re-resolve the connection profile for a fresh warehouse identity and
    /// return the profiles directory together with the environment target.
    ///
    /// Lets a caller point an existing runner at a different project or
    /// dataset without reconstruction. Credentials fall back to
    /// application-default resolution.
    pub fn profiles_dir_and_target(
        &mut self,
        gcp_project_id: impl Into<String>,
        gcp_bq_dataset_id: impl Into<String>,
        gcp_region_id: Option<String>,
    ) -> RunnerResult<(PathBuf, String)> {
        let config = ConnectionConfig {
            project_id: gcp_project_id.into(),
            dataset_id: gcp_bq_dataset_id.into(),
            threads: self.num_threads,
            region: gcp_region_id,
            service_account_key_path: None,
            impersonation_credentials: None,
        };
        let target = self.environment_target.clone();
        self.resolve_connection_configs(config, Some(&target))?;
        Ok((self.profiles_dir.clone(), self.environment_target.clone()))
    }

    fn resolve_connection_configs(
        &mut self,
        config: ConnectionConfig,
        environment_target: Option<&str>,
    ) -> RunnerResult<()> {
        self.environment_target = match environment_target {
            Some(target) => {
                log::debug!("Using environment target: {target}");
                target.to_string()
            }
            None => DEFAULT_ENVIRONMENT_TARGET.to_string(),
        };
        self.profiles_dir = self.dbt_path.clone();
        config.to_profiles_yml(&self.profiles_dir, &self.environment_target)?;
        self.connection_config = config;
        Ok(())
    }
}

/// Resolve `<base>/dbt`, creating it when permitted.
fn resolve_dbt_path(base_dir: Option<&Path>, create_paths_if_not_exists: bool) -> RunnerResult<PathBuf> {
    let base = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(CoreError::Io)?,
    };
    let dbt_path = base.join("dbt");
    if !dbt_path.is_dir() {
        if create_paths_if_not_exists {
            log::debug!("Creating dbt directory at: {}", dbt_path.display());
            ensure_dir(&dbt_path)?;
        } else {
            return Err(CoreError::WorkingDirMissing {
                path: dbt_path.display().to_string(),
            }
            .into());
        }
    }
    Ok(dbt_path)
}

/// True when `needle` appears as a whole (trimmed) line of `text`.
///
/// Substring search is not enough here: `+hours_to_expiration: 24` is a
/// prefix of `+hours_to_expiration: 240`, and a prefix match would defeat
/// the conflicting-descriptor check.
fn contains_line(text: &str, needle: &str) -> bool {
    text.lines().any(|line| line.trim() == needle)
}

/// Materialize `dbt_project.yml` with the caller's expiration value.
///
/// A descriptor already carrying the requested value is preserved byte for
/// byte. A descriptor carrying the unmodified placeholder is rewritten with
/// the substituted value, as is a missing descriptor (rendered fresh from
/// the bundled template). Any other content is a hard error: the expiration
/// line must exist verbatim or the substitution cannot be trusted.
fn prepare_project_file(dbt_path: &Path, expiration_hours: u32) -> RunnerResult<()> {
    let descriptor_path = dbt_path.join("dbt_project.yml");
    let requested = format!("{HOURS_TO_EXPIRATION_KEY}: {expiration_hours}");

    let existing = if descriptor_path.is_file() {
        Some(
            fs::read_to_string(&descriptor_path).map_err(|e| CoreError::IoWithPath {
                path: descriptor_path.display().to_string(),
                source: e,
            })?,
        )
    } else {
        log::debug!(
            "No dbt_project.yml at {}; rendering from bundled template",
            descriptor_path.display()
        );
        None
    };

    let source = match &existing {
        Some(text) if contains_line(text, HOURS_TO_EXPIRATION_PLACEHOLDER) => text.as_str(),
        Some(text) if contains_line(text, &requested) => {
            log::debug!("Intermediate table expiration already set to {expiration_hours} hours");
            return Ok(());
        }
        Some(_) => {
            return Err(CoreError::ExpirationNotSet {
                hours: expiration_hours,
                path: descriptor_path.display().to_string(),
            }
            .into())
        }
        None => template_content("dbt_project.yml")?,
    };

    let mut rendered = String::with_capacity(source.len());
    for line in source.lines() {
        if line.trim() == HOURS_TO_EXPIRATION_PLACEHOLDER {
            rendered.push_str(&line.replacen(HOURS_TO_EXPIRATION_PLACEHOLDER, &requested, 1));
        } else {
            rendered.push_str(line);
        }
        rendered.push('\n');
    }
    if !contains_line(&rendered, &requested) {
        return Err(CoreError::ExpirationNotSet {
            hours: expiration_hours,
            path: descriptor_path.display().to_string(),
        }
        .into());
    }
    if existing.as_deref() == Some(rendered.as_str()) {
        return Ok(());
    }
    log::debug!(
        "Setting intermediate table expiration to {expiration_hours} hours in {}",
        descriptor_path.display()
    );
    fs::write(&descriptor_path, rendered).map_err(|e| CoreError::IoWithPath {
        path: descriptor_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// Materialize the entry and summary SQL models when absent.
fn prepare_model_files(dbt_path: &Path) -> RunnerResult<()> {
    for name in ["main.sql", "dq_summary.sql"] {
        let relative = template_relative_path(name)?;
        let path = dbt_path.join(relative);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        write_template_if_missing(&path)?;
    }
    Ok(())
}

fn prepare_rule_binding_view_path(dbt_path: &Path) -> RunnerResult<PathBuf> {
    let path = dbt_path.join("models").join("rule_binding_views");
    ensure_dir(&path)?;
    Ok(path)
}

fn prepare_entity_summary_path(dbt_path: &Path) -> RunnerResult<PathBuf> {
    let path = dbt_path.join("models").join("entity_dq_statistics");
    ensure_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
