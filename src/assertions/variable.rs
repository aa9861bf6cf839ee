//! Assertions on input variable values.

use serde_json::Value;

use crate::error::Result;
use crate::plan::VariableValue;

use super::expect::{EntityKind, Subject, assert_equal};

/// Accessor over one entry of the plan's `variables`.
#[derive(Debug, Clone, Copy)]
pub struct VariableAssert<'a> {
    name: &'a str,
    variable: &'a VariableValue,
}

impl<'a> VariableAssert<'a> {
    pub(crate) const fn new(name: &'a str, variable: &'a VariableValue) -> Self {
        Self { name, variable }
    }

    /// Variable name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Raw variable value.
    #[must_use]
    pub const fn value(&self) -> &'a Value {
        &self.variable.value
    }

    /// Asserts the variable value.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if the value differs.
    pub fn is(self, value: impl Into<Value>) -> Result<Self> {
        assert_equal(
            &Subject::new(EntityKind::Variable, self.name),
            "value",
            Some(&self.variable.value),
            &value.into(),
        )?;
        Ok(self)
    }
}
