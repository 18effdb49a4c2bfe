//! Probe command implementation - dumps runtime environment diagnostics
//!
//! Used to inspect the driver environment when the CLI is launched inside a
//! distributed-processing container. Output is plain text on stdout; only a
//! failing OS-release lookup aborts the probe, every other step degrades to
//! `<unavailable>`.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tokio::process::Command;

const UNAVAILABLE: &str = "<unavailable>";

/// Execute the probe command
pub(crate) async fn execute() -> Result<()> {
    println!("OS runtime details:");
    let status = Command::new("sh")
        .arg("-c")
        .arg("cat /etc/*-release")
        .status()
        .await
        .context("Failed to launch OS release lookup")?;
    if !status.success() {
        anyhow::bail!("OS release lookup failed: {status}");
    }

    println!("Executable path:");
    match env::current_exe() {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            log::debug!("Could not resolve executable path: {e}");
            println!("{UNAVAILABLE}");
        }
    }

    println!("dqflow version:");
    println!("{}", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir().ok();
    println!("Working directory:");
    match &cwd {
        Some(dir) => println!("{}", dir.display()),
        None => println!("{UNAVAILABLE}"),
    }

    println!("Directory content:");
    match cwd.as_deref().and_then(directory_listing) {
        Some(entries) => println!("{entries:#?}"),
        None => println!("{UNAVAILABLE}"),
    }

    println!("Input arguments:");
    let args: Vec<String> = env::args().collect();
    println!("{args:#?}");

    Ok(())
}

/// Sorted file names under `dir`, or `None` when the listing fails.
fn directory_listing(dir: &Path) -> Option<Vec<String>> {
    let mut entries: Vec<String> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    Some(entries)
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
