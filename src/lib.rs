//! imgshell - build container images one shell command at a time
//!
//! A session runs commands against an image, keeps the ones you commit as
//! layers, lets you step back over committed steps, and renders whatever is
//! still live as a Dockerfile.
//!
//! # Example
//!
//! ```no_run
//! use imgshell::{DockerClient, Mode, Workspace};
//!
//! let mut ws = Workspace::new(DockerClient::new(), Mode::Dockerfile, "ubuntu:24.04");
//! ws.run("apt-get update").unwrap();
//! ws.eval("which curl", false).unwrap();
//! ws.run("apt-get install -y curl").unwrap();
//! ws.back(1).unwrap();
//! println!("{}", ws.sprint().join("\n"));
//! ```

pub mod cli;
pub mod client;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod repl;
pub mod script;
pub mod workspace;

pub use client::{DockerClient, Execution, ExecutionClient, MockClient};
pub use engine::{execute_command, ExecutionContext, ExecutionResult, ResultData};
pub use error::{ImgshellError, Result};
pub use output::{format_output, Mode, OutputFormat};
pub use parser::{parse_command, parse_script, Command, Script};
pub use script::{ScriptResult, ScriptRunner};
pub use workspace::{Layer, Step, Workspace};
