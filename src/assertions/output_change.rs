//! Assertions on proposed output changes.

use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;
use crate::plan::OutputChange;

use super::expect::{EntityKind, Subject, assert_action, assert_equal};
use super::lookup::{Collection, resolve_named};

/// Accessor over the plan's `output_changes` map.
#[derive(Debug, Clone, Copy)]
pub struct OutputChangesAssert<'a> {
    changes: Option<&'a HashMap<String, OutputChange>>,
}

/// Accessor over one output change.
#[derive(Debug, Clone, Copy)]
pub struct OutputChangeAssert<'a> {
    name: &'a str,
    change: &'a OutputChange,
}

impl<'a> OutputChangesAssert<'a> {
    pub(crate) const fn new(changes: Option<&'a HashMap<String, OutputChange>>) -> Self {
        Self { changes }
    }

    /// Asserts a change is planned for the output and keeps the chain going.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no output changes or none for `name`.
    pub fn contains(self, name: &str) -> Result<Self> {
        resolve_named(self.changes, name, Collection::OutputChanges)?;
        Ok(self)
    }

    /// Looks up the change planned for an output.
    ///
    /// # Errors
    ///
    /// Fails if the plan has no output changes or none for `name`.
    pub fn change(&self, name: &str) -> Result<OutputChangeAssert<'a>> {
        let (name, change) = resolve_named(self.changes, name, Collection::OutputChanges)?;
        Ok(OutputChangeAssert { name, change })
    }

    /// Names of the outputs with a planned change, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self
            .changes
            .into_iter()
            .flat_map(HashMap::keys)
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

impl<'a> OutputChangeAssert<'a> {
    fn subject(&self) -> Subject {
        Subject::new(EntityKind::OutputChange, self.name)
    }

    fn snapshot_is(self, property: &str, actual: &Value, expected: Value) -> Result<Self> {
        assert_equal(&self.subject(), property, Some(actual), &expected)?;
        Ok(self)
    }

    /// Output name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Planned actions.
    #[must_use]
    pub fn actions(&self) -> &'a [String] {
        &self.change.actions
    }

    /// Value before the change.
    #[must_use]
    pub const fn before(&self) -> &'a Value {
        &self.change.before
    }

    /// Value after the change.
    #[must_use]
    pub const fn after(&self) -> &'a Value {
        &self.change.after
    }

    /// Unknown marker for the value after the change.
    #[must_use]
    pub const fn after_unknown(&self) -> &'a Value {
        &self.change.after_unknown
    }

    /// Asserts `action` is one of the planned actions.
    ///
    /// # Errors
    ///
    /// Returns `ActionNotPlanned` listing the actual actions.
    pub fn action_is(self, action: &str) -> Result<Self> {
        assert_action(&self.subject(), &self.change.actions, action)?;
        Ok(self)
    }

    /// Asserts the value before the change.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if it differs.
    pub fn before_is(self, before: impl Into<Value>) -> Result<Self> {
        self.snapshot_is("before", self.before(), before.into())
    }

    /// Asserts the value after the change.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if it differs.
    pub fn after_is(self, after: impl Into<Value>) -> Result<Self> {
        self.snapshot_is("after", self.after(), after.into())
    }

    /// Asserts the unknown marker after the change.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if it differs.
    pub fn after_unknown_is(self, after_unknown: impl Into<Value>) -> Result<Self> {
        self.snapshot_is("after_unknown", self.after_unknown(), after_unknown.into())
    }
}
