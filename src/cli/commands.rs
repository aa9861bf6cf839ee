//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tfplan-assert - check Terraform JSON plans against expectations.
#[derive(Parser, Debug)]
#[command(name = "tfplan-assert")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the plan produced by `terraform show -json`.
    #[arg(short, long, global = true, env = "TFPLAN_ASSERT_PLAN", default_value = "tfplan.json")]
    pub plan: PathBuf,

    /// Path to the expectation file (searched for upwards when omitted).
    #[arg(short, long, global = true, env = "TFPLAN_ASSERT_EXPECTATIONS")]
    pub expectations: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the plan against the expectation file.
    Check,

    /// Validate the expectation file without loading a plan.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Summarise the changes in the plan.
    Show,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
