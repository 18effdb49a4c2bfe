//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use dq_runner::RunnerOptions;
use std::path::PathBuf;

/// dqflow - dbt orchestration for a BigQuery data-quality engine
#[derive(Parser, Debug)]
#[command(name = "dq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare the local dbt project and invoke dbt
    Run(RunArgs),

    /// Validate warehouse connectivity and credentials via `dbt debug`
    TestConnection(ConnectionArgs),

    /// Print runtime environment diagnostics
    Probe,
}

/// Warehouse identity and working-directory options shared by commands
/// that construct a runner
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// GCP project id billed for dbt-issued queries
    #[arg(long, env = "GCP_PROJECT_ID")]
    pub gcp_project_id: String,

    /// BigQuery dataset receiving the generated artifacts
    #[arg(long, env = "GCP_BQ_DATASET_ID")]
    pub gcp_bq_dataset_id: String,

    /// Profile target name (defaults to dev)
    #[arg(long, env = "ENVIRONMENT_TARGET")]
    pub environment_target: Option<String>,

    /// BigQuery region, e.g. EU or us-central1
    #[arg(long, env = "GCP_REGION_ID")]
    pub gcp_region_id: Option<String>,

    /// Path to a service-account JSON key file
    #[arg(long)]
    pub gcp_service_account_key_path: Option<PathBuf>,

    /// Service account to impersonate via application-default credentials
    #[arg(long)]
    pub gcp_impersonation_credentials: Option<String>,

    /// Expiration applied to intermediate dbt tables, in hours
    #[arg(long, default_value_t = 24)]
    pub intermediate_table_expiration_hours: u32,

    /// Worker threads for the external dbt process
    #[arg(long, default_value_t = 1)]
    pub num_threads: usize,

    /// Resolve the dbt working directory under this path instead of the
    /// process working directory
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Fail when the dbt working directory is absent instead of creating it
    #[arg(long)]
    pub no_create_paths: bool,
}

impl ConnectionArgs {
    /// Map CLI flags into runner construction options.
    pub fn to_runner_options(&self) -> RunnerOptions {
        let mut options = RunnerOptions::new(&self.gcp_project_id, &self.gcp_bq_dataset_id);
        options.environment_target = self.environment_target.clone();
        options.gcp_region_id = self.gcp_region_id.clone();
        options.gcp_service_account_key_path = self.gcp_service_account_key_path.clone();
        options.gcp_impersonation_credentials = self.gcp_impersonation_credentials.clone();
        options.intermediate_table_expiration_hours = self.intermediate_table_expiration_hours;
        options.num_threads = self.num_threads;
        options.base_dir = self.base_dir.clone();
        options.create_paths_if_not_exists = !self.no_create_paths;
        options
    }
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Connection and working-directory options
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Variables forwarded to dbt, as an inline YAML/JSON mapping
    #[arg(long)]
    pub vars: Option<String>,

    /// Test the connection before running
    #[arg(long)]
    pub debug: bool,

    /// Compile without executing against the warehouse
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
