//! Subprocess seam for the external dbt executable.
//!
//! All execution goes through argv-style invocation; arguments cross the
//! process boundary as discrete elements, never as a shell string.

use crate::error::{RunnerError, RunnerResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// One resolved dbt invocation.
#[derive(Debug, Clone)]
pub struct DbtInvocation {
    /// dbt project directory (holds `dbt_project.yml` and `models/`)
    pub project_dir: PathBuf,

    /// Directory holding the rendered `profiles.yml`
    pub profiles_dir: PathBuf,

    /// Profile target selecting the warehouse output block
    pub environment_target: String,

    /// Variables forwarded to dbt as a `--vars` JSON payload
    pub vars: serde_json::Map<String, serde_json::Value>,

    /// Run `dbt debug` to validate connectivity instead of executing models
    pub debug: bool,

    /// Compile without executing against the warehouse
    pub dry_run: bool,
}

impl DbtInvocation {
    /// The dbt subcommand this invocation resolves to.
    pub fn subcommand(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.dry_run {
            "compile"
        } else {
            "run"
        }
    }

    /// Full argument vector, subcommand first.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            self.subcommand().to_string(),
            "--project-dir".to_string(),
            self.project_dir.display().to_string(),
            "--profiles-dir".to_string(),
            self.profiles_dir.display().to_string(),
            "--target".to_string(),
            self.environment_target.clone(),
        ];
        if !self.debug && !self.vars.is_empty() {
            args.push("--vars".to_string());
            args.push(serde_json::Value::Object(self.vars.clone()).to_string());
        }
        args
    }
}

/// Executes dbt invocations.
///
/// The production implementation spawns the dbt CLI; tests substitute a
/// recording stub.
#[async_trait]
pub trait DbtInvoker: Send + Sync {
    /// Execute the invocation, blocking until dbt exits.
    ///
    /// A non-zero exit propagates as an error; no retry is attempted.
    async fn invoke(&self, invocation: &DbtInvocation) -> RunnerResult<()>;
}

/// Invoker backed by the `dbt` executable on PATH.
#[derive(Debug, Default)]
pub struct DbtCli {
    program: Option<PathBuf>,
}

impl DbtCli {
    /// Use the `dbt` executable found on PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit dbt executable path.
    pub fn with_program(program: PathBuf) -> Self {
        Self {
            program: Some(program),
        }
    }

    fn program(&self) -> PathBuf {
        self.program
            .clone()
            .unwrap_or_else(|| PathBuf::from("dbt"))
    }
}

#[async_trait]
impl DbtInvoker for DbtCli {
    async fn invoke(&self, invocation: &DbtInvocation) -> RunnerResult<()> {
        let args = invocation.to_args();
        let subcommand = invocation.subcommand();
        log::debug!("Invoking dbt with args: {:?}", args);
        let status = Command::new(self.program())
            .args(&args)
            .current_dir(&invocation.project_dir)
            .status()
            .await
            .map_err(|e| RunnerError::Spawn {
                command: subcommand.to_string(),
                source: e,
            })?;
        if !status.success() {
            return Err(RunnerError::DbtFailed {
                command: subcommand.to_string(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "invoker_test.rs"]
mod tests;
