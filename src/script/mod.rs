//! Replaying session files
//!
//! A session file holds one session command per line, in the same
//! language the REPL accepts.

pub mod runner;

pub use runner::{ScriptResult, ScriptRunner};
