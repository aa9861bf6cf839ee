//! The plan facade: entry point for every assertion chain.

use serde_json::Value;
use std::borrow::Cow;

use crate::error::Result;
use crate::plan::{FormatVersion, PlanDocument, PlannedValues, ResourceChange};

use super::configuration::ConfigurationAssert;
use super::expect::{EntityKind, Expectation, Subject};
use super::lookup::{Collection, require, resolve_addressed, resolve_named};
use super::module::ModuleAssert;
use super::output::OutputAssert;
use super::output_change::OutputChangesAssert;
use super::resource_change::ResourceChangeAssert;
use super::variable::VariableAssert;

/// Assertions over one parsed plan document.
///
/// Accessors are built on demand from the decoded document and borrow it;
/// nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct PlanAssertions {
    version: FormatVersion,
    document: PlanDocument,
}

/// Accessor over `planned_values`.
#[derive(Debug, Clone, Copy)]
pub struct PlannedValuesAssert<'a> {
    planned: &'a PlannedValues,
}

impl PlanAssertions {
    /// Dispatches on `format_version` and decodes the document.
    ///
    /// # Errors
    ///
    /// Fails if `format_version` is missing or unregistered, or the document
    /// does not fit the registered model.
    pub fn from_value(document: Value) -> Result<Self> {
        let version = FormatVersion::detect(&document)?;
        let document = version.decode(document)?;
        Ok(Self { version, document })
    }

    /// Format version the plan was dispatched on.
    #[must_use]
    pub const fn format_version(&self) -> FormatVersion {
        self.version
    }

    /// The decoded plan.
    #[must_use]
    pub const fn document(&self) -> &PlanDocument {
        &self.document
    }

    /// Expectation on `terraform_version`.
    pub fn terraform_version(&self) -> Expectation<'_, ()> {
        Expectation::new(
            (),
            Subject::new(EntityKind::Plan, "plan"),
            "terraform_version",
            self.document
                .terraform_version
                .clone()
                .map(|v| Cow::Owned(Value::String(v))),
        )
    }

    /// Looks up an input variable value.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no variables or none named `name`.
    pub fn variable(&self, name: &str) -> Result<VariableAssert<'_>> {
        let (name, variable) =
            resolve_named(self.document.variables.as_ref(), name, Collection::Variables)?;
        Ok(VariableAssert::new(name, variable))
    }

    /// Accessor over `planned_values`.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no `planned_values` section.
    pub fn planned_values(&self) -> Result<PlannedValuesAssert<'_>> {
        require(self.document.planned_values.as_ref(), Collection::PlannedValues)
            .map(|planned| PlannedValuesAssert { planned })
    }

    /// Looks up the change planned for a resource address.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no resource changes, or the address matches zero
    /// or several of them.
    pub fn resource_change(&self, address: &str) -> Result<ResourceChangeAssert<'_>> {
        resolve_addressed(
            self.document.resource_changes.as_ref(),
            address,
            Collection::ResourceChanges,
        )
        .map(ResourceChangeAssert::new)
    }

    /// All resource changes, in plan order.
    #[must_use]
    pub fn resource_changes(&self) -> &[ResourceChange] {
        self.document.resource_changes.as_deref().unwrap_or_default()
    }

    /// Accessor over `output_changes`; lookups fail if the section is absent.
    #[must_use]
    pub const fn output_changes(&self) -> OutputChangesAssert<'_> {
        OutputChangesAssert::new(self.document.output_changes.as_ref())
    }

    /// Accessor over `configuration`.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no `configuration` section.
    pub fn configuration(&self) -> Result<ConfigurationAssert<'_>> {
        require(self.document.configuration.as_ref(), Collection::Configuration)
            .map(ConfigurationAssert::new)
    }
}

impl<'a> PlannedValuesAssert<'a> {
    /// Looks up a planned output.
    ///
    /// # Errors
    ///
    /// Fails if there are no planned outputs or none named `name`.
    pub fn output(&self, name: &str) -> Result<OutputAssert<'a>> {
        let (name, output) = resolve_named(self.planned.outputs.as_ref(), name, Collection::Outputs)?;
        Ok(OutputAssert::new(name, output))
    }

    /// Accessor over the root of the planned module tree.
    ///
    /// # Errors
    ///
    /// Fails if there is no root module.
    pub fn root_module(&self) -> Result<ModuleAssert<'a>> {
        require(self.planned.root_module.as_ref(), Collection::RootModule).map(ModuleAssert::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatVersionError, PlanAssertError};
    use serde_json::json;

    fn plan() -> PlanAssertions {
        PlanAssertions::from_value(json!({
            "format_version": "0.1",
            "terraform_version": "0.12.23",
            "variables": { "APP": { "value": "cloudcommons" } },
            "planned_values": {
                "outputs": { "ID": { "sensitive": false } },
                "root_module": { "resources": [{ "address": "random_id.x", "mode": "managed" }] }
            },
            "resource_changes": [{
                "address": "random_id.x",
                "mode": "managed",
                "change": { "actions": ["create"], "before": null, "after": {} }
            }]
        }))
        .expect("valid plan")
    }

    #[test]
    fn test_facade_dispatch() {
        let plan = plan();
        assert_eq!(plan.format_version(), FormatVersion::V0_1);
        assert!(plan.terraform_version().is("0.12.23").is_ok());
        assert!(plan.terraform_version().is("1.0.0").is_err());
    }

    #[test]
    fn test_terraform_version_mismatch_message() {
        let err = plan().terraform_version().is("1.0.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed: Expected plan plan terraform_version to be \"1.0.0\". Actual: \"0.12.23\""
        );
    }

    #[test]
    fn test_unsupported_version_fails_before_accessors() {
        let err = PlanAssertions::from_value(json!({ "format_version": "0.2", "variables": 5 }))
            .unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::FormatVersion(FormatVersionError::Unsupported { ref found, .. }) if found == "0.2"
        ));
    }

    #[test]
    fn test_facade_lookups() -> crate::error::Result<()> {
        let plan = plan();
        plan.variable("APP")?.is("cloudcommons")?;
        plan.planned_values()?.output("ID")?.is_not_sensitive()?;
        plan.planned_values()?
            .root_module()?
            .resource("random_id.x")?
            .mode()
            .is("managed")?;
        plan.resource_change("random_id.x")?.action().is("create")?.before().is_null()?;
        assert_eq!(plan.resource_changes().len(), 1);
        Ok(())
    }

    #[test]
    fn test_absent_sections() {
        let plan = plan();
        assert_eq!(
            plan.configuration().unwrap_err().to_string(),
            "Lookup failed: The plan contains no configuration"
        );
        assert!(plan.output_changes().change("ID").unwrap_err().is_lookup_failure());

        let bare = PlanAssertions::from_value(json!({ "format_version": "0.1" })).expect("valid");
        assert!(bare.planned_values().is_err());
        assert!(bare.resource_change("random_id.x").is_err());
        assert!(bare.resource_changes().is_empty());
        assert!(bare.terraform_version().is("0.12.23").unwrap_err().is_assertion_failure());
    }
}
