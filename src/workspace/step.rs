//! Step records kept in a workspace's history

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An image layer produced by committing a step's container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// Image reference returned by the commit
    pub image: String,
    /// Position in the session's commit sequence, starting at 1
    pub seq: u64,
}

/// One executed command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// The command as typed
    pub command: String,
    /// Container handle the command ran in
    pub id: String,
    /// Position in the session's execution sequence, starting at 1
    pub seq: u64,
    /// Workspace base image when the step was recorded
    pub base_image: String,
    /// Image the command ran against
    pub image: String,
    /// Set once the container has been committed
    pub layer: Option<Layer>,
    pub exit_code: i32,
    pub duration: Duration,
    /// Output captured by the client; `None` when the terminal was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub started_at: DateTime<Utc>,
    /// Retracted by `back`; kept for auditing
    pub deleted: bool,
}

impl Step {
    /// Image produced by committing this step, if any
    pub fn new_image(&self) -> Option<&str> {
        self.layer.as_ref().map(|layer| layer.image.as_str())
    }

    pub fn is_committed(&self) -> bool {
        self.layer.is_some()
    }

    /// Committed and not retracted
    pub fn is_live_layer(&self) -> bool {
        self.is_committed() && !self.deleted
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
