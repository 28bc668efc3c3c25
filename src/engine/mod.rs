//! Execution engine for session commands

pub mod executor;

pub use executor::{execute_command, ExecutionContext, ExecutionResult, ResultData};
