//! dq-runner - dbt run orchestration for dqflow
//!
//! This crate prepares the local dbt working directory (project descriptor,
//! SQL model templates, output subdirectories, connection profile) and
//! invokes the external dbt process through the `DbtInvoker` seam.

pub mod error;
pub mod invoker;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use invoker::{DbtCli, DbtInvocation, DbtInvoker};
pub use runner::{DbtRunner, RunnerOptions};
