//! Error types for imgshell

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImgshellError {
    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("Commit error: {0}")]
    CommitError(String),

    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// A replayed session file stopped early; the message carries the line
    #[error("{0}")]
    ScriptFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImgshellError>;
