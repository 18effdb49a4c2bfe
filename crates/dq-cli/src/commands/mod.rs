//! Command implementations for the dq CLI

pub mod common;
pub mod probe;
pub mod run;
pub mod test_connection;
