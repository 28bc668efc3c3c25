//! Docker CLI client

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use tracing::debug;

use super::{Execution, ExecutionClient};
use crate::error::{ImgshellError, Result};

/// Default docker binary, resolved through `PATH`
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// Shell that interprets each command inside the container
pub const DEFAULT_SHELL: &str = "sh";

/// Runs commands through the docker CLI.
///
/// Each command gets its own container (`docker create` + `docker start`).
/// Containers are left in place after they exit so they can be committed.
#[derive(Debug, Clone)]
pub struct DockerClient {
    binary: PathBuf,
    shell: String,
}

impl DockerClient {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_DOCKER_BIN)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Use a different shell to interpret commands inside the container
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn docker(&self, args: &[&str]) -> std::io::Result<Output> {
        debug!(binary = %self.binary.display(), ?args, "invoking docker");
        Command::new(&self.binary).args(args).output()
    }

    fn create_args<'a>(&'a self, image: &'a str, command: &'a str, interactive: bool) -> Vec<&'a str> {
        let mut args = vec!["create"];
        if interactive {
            args.extend(["-i", "-t"]);
        }
        args.extend([image, self.shell.as_str(), "-c", command]);
        args
    }

    fn create(&self, image: &str, command: &str, interactive: bool) -> Result<String> {
        let args = self.create_args(image, command, interactive);
        let output = self
            .docker(&args)
            .map_err(|e| ImgshellError::ExecutionError(e.to_string()))?;
        if !output.status.success() {
            return Err(ImgshellError::ExecutionError(stderr_message(&output)));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(ImgshellError::ExecutionError(
                "docker create returned no container id".to_string(),
            ));
        }
        Ok(id)
    }

    fn exit_code(&self, container: &str) -> Result<i32> {
        let output = self
            .docker(&["inspect", "--format", "{{.State.ExitCode}}", container])
            .map_err(|e| ImgshellError::ExecutionError(e.to_string()))?;
        if !output.status.success() {
            return Err(ImgshellError::ExecutionError(stderr_message(&output)));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        text.trim().parse::<i32>().map_err(|_| {
            ImgshellError::ExecutionError(format!(
                "unexpected exit code from docker inspect: '{}'",
                text.trim()
            ))
        })
    }
}

impl Default for DockerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionClient for DockerClient {
    fn run(&mut self, image: &str, command: &str, interactive: bool) -> Result<Execution> {
        let container = self.create(image, command, interactive)?;

        let started = Instant::now();
        let output = if interactive {
            Command::new(&self.binary)
                .args(["start", "-a", "-i", &container])
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| ImgshellError::ExecutionError(e.to_string()))?;
            None
        } else {
            let output = self
                .docker(&["start", "-a", &container])
                .map_err(|e| ImgshellError::ExecutionError(e.to_string()))?;
            let mut text = String::from_utf8_lossy(&output.stdout).to_string();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            Some(text)
        };
        let duration = started.elapsed();

        let exit_code = self.exit_code(&container)?;
        debug!(%container, exit_code, ?duration, "container finished");

        Ok(Execution {
            container,
            exit_code,
            duration,
            output,
        })
    }

    fn commit(&mut self, container: &str) -> Result<String> {
        let output = self
            .docker(&["commit", container])
            .map_err(|e| ImgshellError::CommitError(e.to_string()))?;
        if !output.status.success() {
            return Err(ImgshellError::CommitError(stderr_message(&output)));
        }

        let image = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if image.is_empty() {
            return Err(ImgshellError::CommitError(format!(
                "docker commit returned no image id for container {}",
                container
            )));
        }
        Ok(image)
    }
}

fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("docker exited with {}", output.status)
    } else {
        stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_use_shell() {
        let client = DockerClient::new();
        assert_eq!(
            client.create_args("ubuntu:trusty", "ls /", false),
            ["create", "ubuntu:trusty", "sh", "-c", "ls /"]
        );

        let client = DockerClient::new().with_shell("bash");
        assert_eq!(
            client.create_args("ubuntu:trusty", "ls /", true),
            ["create", "-i", "-t", "ubuntu:trusty", "bash", "-c", "ls /"]
        );
    }

    #[test]
    fn test_missing_binary_is_execution_error() {
        let mut client = DockerClient::with_binary("/nonexistent/imgshell-docker");
        let result = client.run("ubuntu:trusty", "true", false);
        assert!(matches!(result, Err(ImgshellError::ExecutionError(_))));
    }

    #[test]
    fn test_missing_binary_is_commit_error() {
        let mut client = DockerClient::with_binary("/nonexistent/imgshell-docker");
        let result = client.commit("c1");
        assert!(matches!(result, Err(ImgshellError::CommitError(_))));
    }
}
