//! dqflow CLI - prepares a local dbt project and runs it against BigQuery

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{probe, run, test_connection};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::TestConnection(args) => test_connection::execute(args, &cli.global).await,
        cli::Commands::Probe => probe::execute().await,
    }
}
