//! Expectation file validation.
//!
//! Catches mistakes that would otherwise only show up as confusing
//! assertion failures: empty addresses, misspelt actions, snapshot checks
//! that are neither `null` nor a mapping.

use serde_json::Value;
use tracing::debug;

use crate::error::{ExpectationError, PlanAssertError, Result};
use crate::plan::{Action, FormatVersion};

use super::schema::ExpectationFile;

/// Validator for expectation files.
#[derive(Debug, Default)]
pub struct ExpectationValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ExpectationValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an expectation file.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, naming its field.
    pub fn validate(&self, file: &ExpectationFile) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        if file.is_empty() {
            result
                .warnings
                .push(String::from("Expectation file is empty; nothing will be checked"));
        }

        Self::validate_versions(file, &mut result);
        Self::validate_names(file, &mut result);
        Self::validate_resources(file, &mut result);
        Self::validate_resource_changes(file, &mut result);
        Self::validate_output_changes(file, &mut result);

        if result.errors.is_empty() {
            debug!("Expectation validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(PlanAssertError::Expectation(ExpectationError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            )))
        }
    }

    fn validate_versions(file: &ExpectationFile, result: &mut ValidationResult) {
        if let Some(version) = &file.format_version {
            if FormatVersion::from_version_str(version).is_err() {
                result.error(
                    "format_version",
                    format!(
                        "Format version '{version}' is not supported. Supported: {}",
                        FormatVersion::registered_list()
                    ),
                );
            }
        }

        if file.terraform_version.as_deref().is_some_and(str::is_empty) {
            result.error("terraform_version", "Terraform version cannot be empty");
        }
    }

    fn validate_names(file: &ExpectationFile, result: &mut ValidationResult) {
        let sections = [
            ("variables", file.variables.keys().collect::<Vec<_>>()),
            ("outputs", file.outputs.keys().collect()),
            ("output_changes", file.output_changes.keys().collect()),
            ("providers", file.providers.keys().collect()),
            ("config_variables", file.config_variables.keys().collect()),
        ];

        for (section, names) in sections {
            if names.iter().any(|n| n.is_empty()) {
                result.error(section, format!("Names in {section} cannot be empty"));
            }
        }
    }

    fn validate_resources(file: &ExpectationFile, result: &mut ValidationResult) {
        for (i, resource) in file.resources.iter().enumerate() {
            if resource.address.is_empty() {
                result.error(format!("resources[{i}].address"), "Resource address cannot be empty");
            }

            for (j, module) in resource.module.iter().enumerate() {
                if !module.starts_with("module.") {
                    result.error(
                        format!("resources[{i}].module[{j}]"),
                        format!("'{module}' is not a module address"),
                    );
                }
            }

            if let Some(last) = resource.module.last() {
                if !resource.address.starts_with(&format!("{last}.")) {
                    result.warnings.push(format!(
                        "resources[{i}]: address '{}' is not inside module '{last}'",
                        resource.address
                    ));
                }
            }
        }
    }

    fn validate_resource_changes(file: &ExpectationFile, result: &mut ValidationResult) {
        for (i, change) in file.resource_changes.iter().enumerate() {
            let prefix = format!("resource_changes[{i}]");

            if change.address.is_empty() {
                result.error(format!("{prefix}.address"), "Resource address cannot be empty");
            }

            Self::validate_actions(&prefix, &change.actions, result);

            for (name, snapshot) in [("before", &change.before), ("after", &change.after)] {
                if snapshot.as_ref().is_some_and(|v| !is_snapshot_expectation(v)) {
                    result.error(
                        format!("{prefix}.{name}"),
                        format!("{name} must be null or a mapping of expected values"),
                    );
                }
            }

            if change.after_unknown.iter().any(String::is_empty) {
                result.error(
                    format!("{prefix}.after_unknown"),
                    "Unknown keys cannot be empty",
                );
            }
        }
    }

    fn validate_output_changes(file: &ExpectationFile, result: &mut ValidationResult) {
        for (name, change) in &file.output_changes {
            Self::validate_actions(&format!("output_changes.{name}"), &change.actions, result);

            if change.after_unknown.as_ref().is_some_and(|v| !v.is_boolean() && !v.is_object()) {
                result.warnings.push(format!(
                    "output_changes.{name}.after_unknown is usually a boolean"
                ));
            }
        }
    }

    fn validate_actions(prefix: &str, actions: &[String], result: &mut ValidationResult) {
        for (j, action) in actions.iter().enumerate() {
            if let Err(message) = action.parse::<Action>() {
                result.error(format!("{prefix}.actions[{j}]"), message);
            }
        }
    }
}

impl ValidationResult {
    /// Returns true if there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.into(),
            message: message.into(),
        });
    }
}

/// Returns true if `value` can stand for a snapshot check.
#[must_use]
pub fn is_snapshot_expectation(value: &Value) -> bool {
    value.is_null() || value.is_object()
}
