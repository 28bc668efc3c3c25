//! Session command types

use std::fmt;
use std::path::PathBuf;

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:run <cmd>` - run and commit
    Run(String),
    /// `:eval <cmd>` or a plain line - run without committing
    Eval(String),
    /// `:commit` - commit the last evaluated step
    Commit,
    /// `:back [n]` - retract the last n committed steps
    Back(usize),
    /// `:image <ref>` - reset the base image
    Image(String),
    /// `:print` - show the build file
    Print,
    /// `:write <path>` - write the build file
    Write(PathBuf),
    /// `:history` - list every recorded step
    History,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Run(cmd) => write!(f, ":run {}", cmd),
            Command::Eval(cmd) => write!(f, "{}", cmd),
            Command::Commit => write!(f, ":commit"),
            Command::Back(n) => write!(f, ":back {}", n),
            Command::Image(image) => write!(f, ":image {}", image),
            Command::Print => write!(f, ":print"),
            Command::Write(path) => write!(f, ":write {}", path.display()),
            Command::History => write!(f, ":history"),
        }
    }
}

/// A session file: commands with their 1-based line numbers
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub statements: Vec<(usize, Command)>,
}
