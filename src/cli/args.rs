//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::Mode;

/// Default base image when neither `--image` nor `IMGSHELL_IMAGE` is set
pub const DEFAULT_IMAGE: &str = "ubuntu:latest";

#[derive(Parser)]
#[command(name = "imgshell")]
#[command(author, version, about = "Build container images one command at a time", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Base image for the session
    #[arg(long, short, global = true, env = "IMGSHELL_IMAGE", default_value = DEFAULT_IMAGE)]
    pub image: String,

    /// Build file format
    #[arg(long, short, global = true, value_enum, default_value_t = Mode::Dockerfile)]
    pub mode: Mode,

    /// Container runtime to execute commands with
    #[arg(long, global = true, value_enum, default_value_t = Backend::Docker)]
    pub backend: Backend,

    /// Path to the docker binary
    #[arg(long, global = true, env = "IMGSHELL_DOCKER", default_value = crate::client::DEFAULT_DOCKER_BIN)]
    pub docker: PathBuf,

    /// Shell that wraps each command inside the container
    #[arg(long, global = true, env = "IMGSHELL_SHELL", default_value = crate::client::DEFAULT_SHELL)]
    pub shell: String,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// The docker CLI
    Docker,
    /// In-memory runtime that runs nothing (for trying out sessions)
    Mock,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Start an interactive session
    Repl,

    /// Replay a session file
    Replay {
        /// File with one session command per line
        file: PathBuf,

        /// Write the resulting build file here
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Keep going after a command exits non-zero
        #[arg(long)]
        keep_going: bool,
    },
}
