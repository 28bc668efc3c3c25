//! Script runner for replaying session files

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::client::ExecutionClient;
use crate::engine::{execute_command, ExecutionContext, ExecutionResult};
use crate::error::Result;
use crate::output::format_output;
use crate::parser::{parse_script, Script};
use crate::workspace::Workspace;

/// Result of script execution
#[derive(Debug)]
pub struct ScriptResult {
    /// All results from executed statements
    pub results: Vec<ExecutionResult>,
    /// Total statements executed
    pub statements_executed: usize,
    /// Whether the script completed successfully
    pub success: bool,
    /// Error message if script failed
    pub error: Option<String>,
}

/// Replays session commands against a workspace
pub struct ScriptRunner<C> {
    workspace: Workspace<C>,
    exec_ctx: ExecutionContext,
    /// Continue past commands that exit non-zero
    keep_going: bool,
    /// Print each result as it is produced
    echo: bool,
}

impl<C: ExecutionClient> ScriptRunner<C> {
    pub fn new(workspace: Workspace<C>, exec_ctx: ExecutionContext) -> Self {
        Self {
            workspace,
            exec_ctx,
            keep_going: false,
            echo: true,
        }
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Load and run a session file
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptResult> {
        let content = fs::read_to_string(path)?;
        let script = parse_script(&content)?;
        self.run_script(&script)
    }

    /// Run a parsed script, stopping at the first failure
    pub fn run_script(&mut self, script: &Script) -> Result<ScriptResult> {
        let mut results = Vec::new();
        let mut statements_executed = 0;

        for (line, cmd) in &script.statements {
            debug!(line, command = %cmd, "replaying");
            if self.echo && self.exec_ctx.verbose {
                eprintln!("line {}: {}", line, cmd);
            }

            let result = match execute_command(cmd, &mut self.workspace, &self.exec_ctx) {
                Ok(result) => result,
                Err(e) => {
                    return Ok(ScriptResult {
                        results,
                        statements_executed,
                        success: false,
                        error: Some(format!("line {}: {}", line, e)),
                    });
                }
            };
            statements_executed += 1;

            if self.echo {
                println!("{}", format_output(&result, &self.exec_ctx.output_format));
            }

            let exit_code = result.data.exit_code();
            results.push(result);

            if let Some(code) = exit_code.filter(|code| *code != 0) {
                warn!(line, command = %cmd, code, "command exited non-zero");
                if !self.keep_going {
                    return Ok(ScriptResult {
                        results,
                        statements_executed,
                        success: false,
                        error: Some(format!("line {}: '{}' exited with code {}", line, cmd, code)),
                    });
                }
            }
        }

        Ok(ScriptResult {
            results,
            statements_executed,
            success: true,
            error: None,
        })
    }

    pub fn workspace(&self) -> &Workspace<C> {
        &self.workspace
    }

    pub fn into_workspace(self) -> Workspace<C> {
        self.workspace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use crate::output::Mode;
    use std::io::Write;

    fn runner(client: MockClient) -> ScriptRunner<MockClient> {
        let ws = Workspace::new(client, Mode::Dockerfile, "ubuntu:trusty");
        ScriptRunner::new(ws, ExecutionContext::default()).echo(false)
    }

    #[test]
    fn test_run_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# build").unwrap();
        writeln!(file, ":run cmd1").unwrap();
        writeln!(file, ":run cmd2").unwrap();
        writeln!(file, ":run cmd3").unwrap();
        writeln!(file, ":back 2").unwrap();
        writeln!(file, ":run cmd4").unwrap();

        let mut runner = runner(MockClient::new());
        let result = runner.run_file(file.path()).unwrap();
        assert!(result.success);
        assert_eq!(result.statements_executed, 5);
        assert_eq!(
            runner.workspace().sprint(),
            vec!["FROM ubuntu:trusty", "RUN cmd1", "RUN cmd4"]
        );
    }

    #[test]
    fn test_stops_at_usage_error() {
        let script = parse_script(":run cmd1\n:back 5\n:run cmd2\n").unwrap();
        let mut runner = runner(MockClient::new());
        let result = runner.run_script(&script).unwrap();
        assert!(!result.success);
        assert_eq!(result.statements_executed, 1);
        assert!(result.error.unwrap().starts_with("line 2:"));
    }

    #[test]
    fn test_stops_at_non_zero_exit() {
        let script = parse_script(":run false\n:run cmd2\n").unwrap();
        let mut runner = runner(MockClient::new().with_exit_code("false", 1));
        let result = runner.run_script(&script).unwrap();
        assert!(!result.success);
        assert_eq!(result.statements_executed, 1);
        assert_eq!(runner.workspace().history().len(), 1);
    }

    #[test]
    fn test_keep_going() {
        let script = parse_script(":run false\n:run cmd2\n").unwrap();
        let mut runner = runner(MockClient::new().with_exit_code("false", 1)).keep_going(true);
        let result = runner.run_script(&script).unwrap();
        assert!(result.success);
        assert_eq!(result.statements_executed, 2);
        assert_eq!(runner.into_workspace().rendered().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let mut runner = runner(MockClient::new());
        assert!(runner.run_file(Path::new("/nonexistent/session.txt")).is_err());
    }
}
