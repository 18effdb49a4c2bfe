//! Run command implementation - prepares the dbt project and invokes dbt

use anyhow::{Context, Result};
use dq_runner::DbtRunner;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::parse_vars;

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let vars = match &args.vars {
        Some(raw) => parse_vars(raw)?,
        None => serde_json::Map::new(),
    };

    let runner = DbtRunner::new(args.connection.to_runner_options())
        .context("Failed to prepare the local dbt project")?;

    if global.verbose {
        eprintln!(
            "[verbose] dbt project prepared at {}",
            runner.dbt_path()?.display()
        );
        eprintln!(
            "[verbose] environment target: {}",
            runner.environment_target()
        );
    }

    runner
        .run(&vars, args.debug, args.dry_run)
        .await
        .context("dbt run failed")?;

    if args.dry_run {
        println!("Dry run completed: project compiled successfully.");
    } else {
        println!("dbt run completed successfully.");
    }
    Ok(())
}
