//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! plan summaries and check results in text or JSON.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::assertions::PlanAssertions;
use crate::expectations::{RunSummary, ValidationResult};
use crate::plan::{Action, Change};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Change row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Actions")]
    actions: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a summary of the changes in a plan.
    #[must_use]
    pub fn format_summary(&self, plan: &PlanAssertions) -> String {
        let summary = PlanSummaryJson::from(plan);
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&summary).unwrap_or_default(),
            OutputFormat::Text => Self::format_summary_text(&summary),
        }
    }

    fn format_summary_text(summary: &PlanSummaryJson) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "\nPlan format {} (Terraform {})\n",
            summary.format_version,
            summary.terraform_version.as_deref().unwrap_or("unknown")
        );

        if summary.resource_changes.is_empty() {
            let _ = writeln!(output, "{} No resource changes.", "✓".green());
        } else {
            let _ = writeln!(output, "Resource changes:");
            output.push_str(&Self::change_table(&summary.resource_changes));
            output.push('\n');
        }

        if !summary.output_changes.is_empty() {
            let _ = writeln!(output, "\nOutput changes:");
            output.push_str(&Self::change_table(&summary.output_changes));
            output.push('\n');
        }

        let _ = writeln!(
            output,
            "\nPlan: {} to create, {} to update, {} to destroy",
            summary.create.to_string().green(),
            summary.update.to_string().yellow(),
            summary.destroy.to_string().red()
        );

        output
    }

    fn change_table(changes: &[ChangeJson]) -> String {
        let rows: Vec<ChangeRow> = changes
            .iter()
            .map(|c| ChangeRow {
                address: c.address.clone(),
                actions: c
                    .actions
                    .iter()
                    .map(String::as_str)
                    .map(Self::format_action)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();
        Table::new(rows).to_string()
    }

    /// Formats an action name with its color.
    fn format_action(action: &str) -> String {
        match action.parse::<Action>() {
            Ok(Action::Create) => action.green().to_string(),
            Ok(Action::Update) => action.yellow().to_string(),
            Ok(Action::Delete) => action.red().to_string(),
            Ok(Action::Read) => action.cyan().to_string(),
            Ok(Action::NoOp) | Err(_) => action.dimmed().to_string(),
        }
    }

    /// Formats the result of a successful expectation run.
    #[must_use]
    pub fn format_run_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "status": "success",
                "checks": summary.checks,
            }))
            .unwrap_or_default(),
            OutputFormat::Text => {
                format!("{} All {} checks passed", "✓".green(), summary.checks)
            }
        }
    }

    /// Formats the result of a passing validation.
    ///
    /// Failing validations surface as errors, so only warnings are reported.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        let warnings: &[String] = if show_warnings { &result.warnings } else { &[] };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "warnings": warnings,
            }))
            .unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = format!("{} Expectation file is valid", "✓".green());
                if !warnings.is_empty() {
                    let _ = write!(output, "\n\n{}:", "Warnings".yellow());
                    for warning in warnings {
                        let _ = write!(output, "\n  - {warning}");
                    }
                }
                output
            }
        }
    }
}

// JSON serialization helpers

#[derive(Serialize)]
struct PlanSummaryJson {
    format_version: String,
    terraform_version: Option<String>,
    resource_changes: Vec<ChangeJson>,
    output_changes: Vec<ChangeJson>,
    create: usize,
    update: usize,
    destroy: usize,
}

#[derive(Serialize)]
struct ChangeJson {
    address: String,
    actions: Vec<String>,
}

impl ChangeJson {
    fn new(address: &str, change: &Change) -> Self {
        Self {
            address: address.to_string(),
            actions: change.actions.clone(),
        }
    }

    fn plans(&self, action: Action) -> bool {
        self.actions.iter().any(|a| a == action.as_str())
    }
}

impl From<&PlanAssertions> for PlanSummaryJson {
    fn from(plan: &PlanAssertions) -> Self {
        let resource_changes: Vec<ChangeJson> = plan
            .resource_changes()
            .iter()
            .map(|rc| ChangeJson::new(&rc.address, &rc.change))
            .collect();

        let mut output_changes: Vec<ChangeJson> = plan
            .document()
            .output_changes
            .iter()
            .flatten()
            .map(|(name, change)| ChangeJson::new(name, change))
            .collect();
        output_changes.sort_by(|a, b| a.address.cmp(&b.address));

        let count = |action| resource_changes.iter().filter(|c| c.plans(action)).count();

        Self {
            format_version: plan.format_version().to_string(),
            terraform_version: plan.document().terraform_version.clone(),
            create: count(Action::Create),
            update: count(Action::Update),
            destroy: count(Action::Delete),
            resource_changes,
            output_changes,
        }
    }
}
