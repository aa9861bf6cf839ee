//! tfplan-assert CLI entrypoint.
//!
//! This is the main entrypoint for the tfplan-assert command-line tool.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tfplan_assert::cli::{Cli, Commands, OutputFormatter};
use tfplan_assert::error::Result;
use tfplan_assert::expectations::{
    ExpectationFile, ExpectationParser, ExpectationRunner, ExpectationValidator,
    find_expectations_file,
};
use tfplan_assert::loader::PlanLoader;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Check => cmd_check(&cli.plan, cli.expectations.as_ref(), &formatter),
        Commands::Validate { warnings } => {
            cmd_validate(cli.expectations.as_ref(), warnings, &formatter)
        }
        Commands::Show => cmd_show(&cli.plan, &formatter),
    }
}

/// Check a plan against its expectation file.
fn cmd_check(
    plan_path: &Path,
    expectations_path: Option<&PathBuf>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let expectations = load_expectations(expectations_path)?;
    let plan = PlanLoader::new().load_file(plan_path)?;

    let summary = ExpectationRunner::new(&plan).run(&expectations)?;
    info!("Plan {} meets all expectations", plan_path.display());

    println!("{}", formatter.format_run_summary(&summary));
    Ok(())
}

/// Validate an expectation file.
fn cmd_validate(
    expectations_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let path = resolve_expectations_path(expectations_path)?;
    info!("Validating expectations: {}", path.display());

    let file = ExpectationParser::new().load_file(&path)?;
    let result = ExpectationValidator::new().validate(&file)?;

    println!("{}", formatter.format_validation(&result, show_warnings));
    Ok(())
}

/// Show a summary of the plan.
fn cmd_show(plan_path: &Path, formatter: &OutputFormatter) -> Result<()> {
    let plan = PlanLoader::new().load_file(plan_path)?;
    println!("{}", formatter.format_summary(&plan));
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the expectation file path.
fn resolve_expectations_path(path: Option<&PathBuf>) -> Result<PathBuf> {
    path.map_or_else(|| find_expectations_file("."), |path| Ok(path.clone()))
}

/// Loads and validates the expectation file.
fn load_expectations(path: Option<&PathBuf>) -> Result<ExpectationFile> {
    let path = resolve_expectations_path(path)?;
    debug!("Loading expectations from: {}", path.display());

    let file = ExpectationParser::new().load_file(&path)?;
    let result = ExpectationValidator::new().validate(&file)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    Ok(file)
}
