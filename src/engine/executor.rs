//! Command executor

use std::path::PathBuf;

use serde::Serialize;

use crate::client::ExecutionClient;
use crate::error::Result;
use crate::output::OutputFormat;
use crate::parser::Command;
use crate::workspace::{Step, Workspace};

/// Execution context containing runtime configuration
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Attach the terminal to commands instead of capturing their output
    pub interactive: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            interactive: false,
            output_format: OutputFormat::Human,
            verbose: false,
        }
    }
}

/// Result of command execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub data: ResultData,
    /// Image the next command will run against
    pub active_image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultData {
    /// A step recorded by run or eval
    Step(Step),
    /// The image produced by committing the last step
    Committed { image: String },
    /// Steps retracted by back
    Retracted { count: usize },
    /// The base image was reset
    ImageSet { image: String },
    /// Build-file lines
    Lines { lines: Vec<String> },
    /// The build file was written to disk
    Written { path: PathBuf },
    /// Every recorded step
    History { steps: Vec<Step> },
}

impl ResultData {
    /// Exit code of the executed command, if this result came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ResultData::Step(step) => Some(step.exit_code),
            _ => None,
        }
    }
}

/// Execute a parsed command against a workspace
pub fn execute_command<C: ExecutionClient>(
    cmd: &Command,
    workspace: &mut Workspace<C>,
    ctx: &ExecutionContext,
) -> Result<ExecutionResult> {
    let data = match cmd {
        Command::Run(command) => ResultData::Step(workspace.run_with(command, ctx.interactive)?),
        Command::Eval(command) => ResultData::Step(workspace.eval(command, ctx.interactive)?),
        Command::Commit => ResultData::Committed {
            image: workspace.commit_last()?,
        },
        Command::Back(count) => {
            workspace.back(*count)?;
            ResultData::Retracted { count: *count }
        }
        Command::Image(image) => {
            workspace.set_image(image.as_str());
            ResultData::ImageSet {
                image: image.clone(),
            }
        }
        Command::Print => ResultData::Lines {
            lines: workspace.sprint(),
        },
        Command::Write(path) => {
            workspace.write(path)?;
            ResultData::Written { path: path.clone() }
        }
        Command::History => ResultData::History {
            steps: workspace.history().to_vec(),
        },
    };

    Ok(ExecutionResult {
        data,
        active_image: workspace.active_image().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::error::ImgshellError;
    use crate::output::{format_output, Mode};
    use crate::parser::parse_command;

    fn execute(ws: &mut Workspace<MockClient>, line: &str) -> Result<ExecutionResult> {
        let cmd = parse_command(line)?;
        execute_command(&cmd, ws, &ExecutionContext::default())
    }

    #[test]
    fn test_session_flow() {
        let mut ws = Workspace::new(MockClient::new(), Mode::Dockerfile, "ubuntu:trusty");

        let result = execute(&mut ws, ":run cmd1").unwrap();
        assert_eq!(result.active_image, "i1");
        assert_eq!(result.data.exit_code(), Some(0));

        execute(&mut ws, "cmd2").unwrap();
        let result = execute(&mut ws, ":commit").unwrap();
        assert!(matches!(result.data, ResultData::Committed { ref image } if image == "i2"));

        let result = execute(&mut ws, ":back").unwrap();
        assert_eq!(result.active_image, "i1");

        let result = execute(&mut ws, ":print").unwrap();
        match result.data {
            ResultData::Lines { lines } => assert_eq!(lines, vec!["FROM ubuntu:trusty", "RUN cmd1"]),
            other => panic!("unexpected result: {:?}", other),
        }

        let result = execute(&mut ws, ":history").unwrap();
        match result.data {
            ResultData::History { steps } => {
                assert_eq!(steps.len(), 2);
                assert!(steps[1].deleted);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_command_output_reaches_formatted_result() {
        let client = MockClient::new().with_output("cat /etc/issue", "Ubuntu 14.04 LTS\n");
        let mut ws = Workspace::new(client, Mode::Dockerfile, "ubuntu:trusty");

        let result = execute(&mut ws, "cat /etc/issue").unwrap();
        let human = format_output(&result, &OutputFormat::Human);
        assert!(human.ends_with("\nUbuntu 14.04 LTS"));

        let json: serde_json::Value =
            serde_json::from_str(&format_output(&result, &OutputFormat::Json)).unwrap();
        assert_eq!(json["data"]["output"], "Ubuntu 14.04 LTS\n");
    }

    #[test]
    fn test_image_command() {
        let mut ws = Workspace::new(MockClient::new(), Mode::Dockerfile, "ubuntu:trusty");
        let result = execute(&mut ws, ":image alpine:3").unwrap();
        assert_eq!(result.active_image, "alpine:3");
        assert_eq!(ws.image(), "alpine:3");
    }

    #[test]
    fn test_usage_errors_propagate() {
        let mut ws = Workspace::new(MockClient::new(), Mode::Dockerfile, "ubuntu:trusty");
        assert!(matches!(execute(&mut ws, ":commit"), Err(ImgshellError::UsageError(_))));
        assert!(matches!(execute(&mut ws, ":back 1"), Err(ImgshellError::UsageError(_))));
    }

    #[test]
    fn test_write_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        let mut ws = Workspace::new(MockClient::new(), Mode::Dockerfile, "ubuntu:trusty");

        execute(&mut ws, ":run touch /tmp/x").unwrap();
        execute(&mut ws, &format!(":write {}", path.display())).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "FROM ubuntu:trusty\nRUN touch /tmp/x\n");
    }
}
