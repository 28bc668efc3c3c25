//! JSON output formatting

use serde_json::{json, Value};

use crate::engine::ExecutionResult;

pub fn format_json(result: &ExecutionResult) -> String {
    let data: Value = serde_json::to_value(result).unwrap_or(json!(null));
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
