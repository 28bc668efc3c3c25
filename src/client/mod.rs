//! Execution clients for running commands in containers
//!
//! The workspace only needs two primitives from a container runtime:
//! - run a command in a fresh container created from an image
//! - commit a container's filesystem to a new image reference
//!
//! `DockerClient` drives the docker CLI, `MockClient` is an in-memory
//! double used by tests and by `--backend mock`.

mod docker;
mod mock;

use std::time::Duration;

use crate::error::Result;

pub use docker::{DockerClient, DEFAULT_DOCKER_BIN, DEFAULT_SHELL};
pub use mock::MockClient;

/// Outcome of running one command in a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Handle of the container the command ran in
    pub container: String,
    /// Exit code of the command
    pub exit_code: i32,
    /// Wall-clock time spent running the command
    pub duration: Duration,
    /// Captured output, if the client captured it
    pub output: Option<String>,
}

/// The container runtime capability the workspace depends on
pub trait ExecutionClient {
    /// Run `command` in a new container created from `image`.
    ///
    /// `interactive` lets the client attach the caller's terminal instead of
    /// capturing output. A non-zero exit code is reported in the returned
    /// `Execution`, not as an error.
    fn run(&mut self, image: &str, command: &str, interactive: bool) -> Result<Execution>;

    /// Commit the container's filesystem state, returning the new image reference.
    fn commit(&mut self, container: &str) -> Result<String>;
}

impl<C: ExecutionClient + ?Sized> ExecutionClient for Box<C> {
    fn run(&mut self, image: &str, command: &str, interactive: bool) -> Result<Execution> {
        (**self).run(image, command, interactive)
    }

    fn commit(&mut self, container: &str) -> Result<String> {
        (**self).commit(container)
    }
}
