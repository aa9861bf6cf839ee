//! Runs an expectation file against a loaded plan.
//!
//! Every entry is translated into the same accessor chain a test would
//! write by hand. The run stops at the first broken expectation and returns
//! its error unchanged.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, info};

use crate::assertions::{
    EntityKind, Expectation, ModuleAssert, PlanAssertions, ProviderAssert,
    ResourceAssert, ResourceChangeAssert, SnapshotAssert, Subject,
};
use crate::error::{ExpectationError, LookupError, PlanAssertError, Result};

use super::schema::{
    ConfigVariableExpectation, ExpectationFile, OutputChangeExpectation, OutputExpectation,
    ProviderExpectation, ResourceChangeExpectation, ResourceExpectation,
};

/// Runs expectation files against one plan.
#[derive(Debug, Clone, Copy)]
pub struct ExpectationRunner<'a> {
    plan: &'a PlanAssertions,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of individual checks that passed.
    pub checks: usize,
}

impl<'a> ExpectationRunner<'a> {
    /// Creates a runner over `plan`.
    #[must_use]
    pub const fn new(plan: &'a PlanAssertions) -> Self {
        Self { plan }
    }

    /// Checks every expectation in `file`.
    ///
    /// # Errors
    ///
    /// Returns the first lookup or assertion failure.
    pub fn run(&self, file: &ExpectationFile) -> Result<RunSummary> {
        info!("Running expectations against plan");
        let mut checks = 0;

        if let Some(version) = &file.format_version {
            self.format_version().is(version.as_str())?;
            checks += 1;
        }

        if let Some(version) = &file.terraform_version {
            self.plan.terraform_version().is(version.as_str())?;
            checks += 1;
        }

        for (name, value) in &file.variables {
            debug!("Checking variable {name}");
            self.plan.variable(name)?.is(value.clone())?;
            checks += 1;
        }

        for (name, expected) in &file.outputs {
            self.check_output(name, expected, &mut checks)?;
        }

        for expected in &file.resources {
            self.check_resource(expected, &mut checks)?;
        }

        for expected in &file.resource_changes {
            self.check_resource_change(expected, &mut checks)?;
        }

        for (name, expected) in &file.output_changes {
            self.check_output_change(name, expected, &mut checks)?;
        }

        for (name, expected) in &file.providers {
            self.check_provider(name, expected, &mut checks)?;
        }

        for (name, expected) in &file.config_variables {
            self.check_config_variable(name, expected, &mut checks)?;
        }

        info!("{checks} checks passed");
        Ok(RunSummary { checks })
    }

    fn format_version(&self) -> Expectation<'a, ()> {
        let version = self.plan.format_version();
        Expectation::new(
            (),
            Subject::new(EntityKind::Plan, "plan"),
            "format_version",
            Some(Cow::Owned(Value::from(version.as_str()))),
        )
    }

    fn check_output(&self, name: &str, expected: &OutputExpectation, checks: &mut usize) -> Result<()> {
        debug!("Checking output {name}");
        let mut output = self.plan.planned_values()?.output(name)?;

        match expected.sensitive {
            Some(true) => output = output.is_sensitive()?,
            Some(false) => output = output.is_not_sensitive()?,
            None => {}
        }
        *checks += usize::from(expected.sensitive.is_some());

        if let Some(value) = &expected.value {
            output.value().is(value.clone())?;
            *checks += 1;
        }
        Ok(())
    }

    /// Walks `path` from the root module, one child module per entry.
    fn module(&self, path: &[String]) -> Result<ModuleAssert<'a>> {
        let mut module = self.plan.planned_values()?.root_module()?;
        for address in path {
            let children = module.child_modules().ok_or_else(|| {
                PlanAssertError::from(LookupError::absent(format!(
                    "child modules under {}",
                    module.address()
                )))
            })?;
            module = children.module(address)?;
        }
        Ok(module)
    }

    fn check_resource(&self, expected: &ResourceExpectation, checks: &mut usize) -> Result<()> {
        debug!("Checking resource {}", expected.address);
        let mut resource = self.module(&expected.module)?.resource(&expected.address)?;

        resource = check(resource, expected.mode.as_ref(), ResourceAssert::mode, checks)?;
        resource = check(resource, expected.resource_type.as_ref(), ResourceAssert::resource_type, checks)?;
        resource = check(resource, expected.name.as_ref(), ResourceAssert::name, checks)?;
        resource = check(resource, expected.provider_name.as_ref(), ResourceAssert::provider_name, checks)?;
        resource = check(resource, expected.schema_version.as_ref(), ResourceAssert::schema_version, checks)?;

        for (key, value) in &expected.values {
            resource = resource.value(key).is(value.clone())?;
            *checks += 1;
        }
        Ok(())
    }

    fn check_resource_change(
        &self,
        expected: &ResourceChangeExpectation,
        checks: &mut usize,
    ) -> Result<()> {
        debug!("Checking resource change {}", expected.address);
        let mut change = self.plan.resource_change(&expected.address)?;

        change = check(change, expected.mode.as_ref(), ResourceChangeAssert::mode, checks)?;
        change = check(change, expected.resource_type.as_ref(), ResourceChangeAssert::resource_type, checks)?;
        change = check(change, expected.name.as_ref(), ResourceChangeAssert::name, checks)?;
        change = check(change, expected.provider_name.as_ref(), ResourceChangeAssert::provider_name, checks)?;

        for action in &expected.actions {
            change = change.action().is(action)?;
            *checks += 1;
        }

        if let Some(before) = &expected.before {
            check_snapshot(change.before(), before, &expected.address, checks)?;
        }
        if let Some(after) = &expected.after {
            check_snapshot(change.after(), after, &expected.address, checks)?;
        }

        let unknown = change.unknown();
        for key in &expected.after_unknown {
            unknown.is(key)?;
            *checks += 1;
        }
        Ok(())
    }

    fn check_output_change(
        &self,
        name: &str,
        expected: &OutputChangeExpectation,
        checks: &mut usize,
    ) -> Result<()> {
        debug!("Checking output change {name}");
        let mut change = self.plan.output_changes().change(name)?;

        for action in &expected.actions {
            change = change.action_is(action)?;
            *checks += 1;
        }
        if let Some(before) = &expected.before {
            change = change.before_is(before.clone())?;
            *checks += 1;
        }
        if let Some(after) = &expected.after {
            change = change.after_is(after.clone())?;
            *checks += 1;
        }
        if let Some(after_unknown) = &expected.after_unknown {
            change.after_unknown_is(after_unknown.clone())?;
            *checks += 1;
        }
        Ok(())
    }

    fn check_provider(&self, key: &str, expected: &ProviderExpectation, checks: &mut usize) -> Result<()> {
        debug!("Checking provider {key}");
        let mut provider = self.plan.configuration()?.provider(key)?;

        provider = check(provider, expected.name.as_ref(), ProviderAssert::name, checks)?;
        provider = check(
            provider,
            expected.version_constraint.as_ref(),
            ProviderAssert::version_constraint,
            checks,
        )?;

        for (property, value) in &expected.properties {
            provider = provider.property(property).is(value.clone())?;
            *checks += 1;
        }
        Ok(())
    }

    fn check_config_variable(
        &self,
        name: &str,
        expected: &ConfigVariableExpectation,
        checks: &mut usize,
    ) -> Result<()> {
        debug!("Checking configuration variable {name}");
        let mut variable = self.plan.configuration()?.variable(name)?;

        if let Some(default) = &expected.default {
            variable = variable.default_is(default.clone())?;
            *checks += 1;
        }
        if let Some(description) = &expected.description {
            variable.description_is(description)?;
            *checks += 1;
        }
        Ok(())
    }
}

/// Runs `property(parent).is(expected)` when an expected value is given.
fn check<'a, P, T>(
    parent: P,
    expected: Option<&T>,
    property: impl FnOnce(P) -> Expectation<'a, P>,
    checks: &mut usize,
) -> Result<P>
where
    T: Clone + Into<Value>,
{
    match expected {
        Some(value) => {
            *checks += 1;
            property(parent).is(value.clone())
        }
        None => Ok(parent),
    }
}

fn check_snapshot(
    snapshot: SnapshotAssert<'_>,
    expected: &Value,
    address: &str,
    checks: &mut usize,
) -> Result<()> {
    match expected {
        Value::Null => {
            snapshot.is_null()?;
            *checks += 1;
        }
        Value::Object(keys) => {
            for (key, value) in keys {
                snapshot.is(key, value.clone())?;
                *checks += 1;
            }
        }
        _ => {
            return Err(ExpectationError::validation(
                "Snapshot expectations must be null or a mapping",
                format!("resource_changes.{address}"),
            )
            .into());
        }
    }
    Ok(())
}
