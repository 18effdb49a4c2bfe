//! Test-connection command implementation - runs `dbt debug`

use anyhow::{Context, Result};
use dq_runner::DbtRunner;

use crate::cli::{ConnectionArgs, GlobalArgs};

/// Execute the test-connection command
pub(crate) async fn execute(args: &ConnectionArgs, global: &GlobalArgs) -> Result<()> {
    let runner = DbtRunner::new(args.to_runner_options())
        .context("Failed to prepare the local dbt project")?;

    if global.verbose {
        eprintln!(
            "[verbose] testing connection for target '{}'",
            runner.environment_target()
        );
    }

    runner
        .test_connection()
        .await
        .context("Connection test failed")?;

    println!(
        "Connection to project '{}' verified for target '{}'.",
        args.gcp_project_id,
        runner.environment_target()
    );
    Ok(())
}
