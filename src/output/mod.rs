//! Output formatting module
//!
//! `Mode` renders the build file itself; `OutputFormat` picks how command
//! results are shown to the user.

pub mod human;
pub mod json;
pub mod mode;

use crate::engine::ExecutionResult;

pub use mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Render a command result for display
pub fn format_output(result: &ExecutionResult, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_human(result),
        OutputFormat::Json => json::format_json(result),
    }
}
