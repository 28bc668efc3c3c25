//! Session workspace: command history, image lineage and undo

mod step;
mod workspace;

pub use step::{Layer, Step};
pub use workspace::Workspace;
