//! In-memory execution client

use std::collections::HashMap;
use std::time::Duration;

use super::{Execution, ExecutionClient};
use crate::error::{ImgshellError, Result};

/// Execution client that never touches a container runtime.
///
/// Containers are named `c1, c2, ...` and images `i1, i2, ...` in the order
/// they are created.
#[derive(Debug, Default)]
pub struct MockClient {
    containers: u64,
    images: u64,
    exit_codes: HashMap<String, i32>,
    outputs: HashMap<String, String>,
    fail_run: Option<String>,
    fail_commit: Option<String>,
    runs: Vec<(String, String)>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` exit with `code` whenever it is run
    pub fn with_exit_code(mut self, command: &str, code: i32) -> Self {
        self.exit_codes.insert(command.to_string(), code);
        self
    }

    /// Make `command` print `output` whenever it is run
    pub fn with_output(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }

    /// Fail the next `run` call with an execution error
    pub fn fail_next_run(&mut self, message: &str) {
        self.fail_run = Some(message.to_string());
    }

    /// Fail the next `commit` call with a commit error
    pub fn fail_next_commit(&mut self, message: &str) {
        self.fail_commit = Some(message.to_string());
    }

    /// Every successful run as `(image, command)`, in order
    pub fn runs(&self) -> &[(String, String)] {
        &self.runs
    }
}

impl ExecutionClient for MockClient {
    fn run(&mut self, image: &str, command: &str, _interactive: bool) -> Result<Execution> {
        if let Some(message) = self.fail_run.take() {
            return Err(ImgshellError::ExecutionError(message));
        }

        self.containers += 1;
        self.runs.push((image.to_string(), command.to_string()));

        Ok(Execution {
            container: format!("c{}", self.containers),
            exit_code: self.exit_codes.get(command).copied().unwrap_or(0),
            duration: Duration::from_millis(1),
            output: Some(self.outputs.get(command).cloned().unwrap_or_default()),
        })
    }

    fn commit(&mut self, _container: &str) -> Result<String> {
        if let Some(message) = self.fail_commit.take() {
            return Err(ImgshellError::CommitError(message));
        }

        self.images += 1;
        Ok(format!("i{}", self.images))
    }
}
