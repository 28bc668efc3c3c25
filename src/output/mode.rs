//! Build-file rendering strategies

use std::fmt;
use std::str::FromStr;

use crate::error::ImgshellError;

/// How a session is serialized when printed or written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// `FROM <image>` followed by one `RUN <command>` per committed step
    #[default]
    Dockerfile,
    /// A POSIX shell script replaying the committed commands
    Shell,
}

impl Mode {
    /// Lines emitted before any step
    pub fn header(&self, image: &str) -> Vec<String> {
        match self {
            Mode::Dockerfile => vec![format!("FROM {}", image)],
            Mode::Shell => vec![
                "#!/bin/sh".to_string(),
                "set -e".to_string(),
                format!("# base image: {}", image),
            ],
        }
    }

    /// The line recorded for one committed command
    pub fn step_line(&self, command: &str) -> String {
        match self {
            Mode::Dockerfile => format!("RUN {}", command),
            Mode::Shell => command.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dockerfile => "dockerfile",
            Mode::Shell => "shell",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ImgshellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dockerfile" => Ok(Mode::Dockerfile),
            "shell" | "sh" => Ok(Mode::Shell),
            other => Err(ImgshellError::UsageError(format!(
                "Unknown mode '{}' (expected dockerfile or shell)",
                other
            ))),
        }
    }
}
