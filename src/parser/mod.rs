//! Parser module for session commands

pub mod ast;
pub mod grammar;

pub use ast::*;
pub use grammar::{parse_command, parse_script};
