//! CLI module for tfplan-assert.
//!
//! This module provides the command-line interface for checking plans
//! against expectation files.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
