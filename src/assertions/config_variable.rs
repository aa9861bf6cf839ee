//! Assertions on variables declared in configuration.

use serde_json::Value;

use crate::error::Result;
use crate::plan::VariableDeclaration;

use super::expect::{EntityKind, Subject, assert_equal, assert_present};

/// Accessor over one `configuration.root_module.variables` entry.
///
/// This is the declaration, not the value the plan was run with; see
/// [`VariableAssert`](super::VariableAssert) for the latter.
#[derive(Debug, Clone, Copy)]
pub struct ConfigVariableAssert<'a> {
    name: &'a str,
    declaration: &'a VariableDeclaration,
}

impl<'a> ConfigVariableAssert<'a> {
    pub(crate) const fn new(name: &'a str, declaration: &'a VariableDeclaration) -> Self {
        Self { name, declaration }
    }

    fn subject(&self) -> Subject {
        Subject::new(EntityKind::ConfigVariable, self.name)
    }

    /// Variable name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Raw declaration.
    #[must_use]
    pub const fn get(&self) -> &'a VariableDeclaration {
        self.declaration
    }

    /// Asserts the declared default. A missing default reads as `null`.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if the default differs.
    pub fn default_is(self, default: impl Into<Value>) -> Result<Self> {
        let actual = self.declaration.default.as_ref().unwrap_or(&Value::Null);
        assert_equal(&self.subject(), "default", Some(actual), &default.into())?;
        Ok(self)
    }

    /// Asserts a description is declared. An empty string counts as declared.
    ///
    /// # Errors
    ///
    /// Returns `MissingProperty` if there is no description.
    pub fn has_description(self) -> Result<Self> {
        self.description()?;
        Ok(self)
    }

    /// Asserts the declared description, checking presence first.
    ///
    /// # Errors
    ///
    /// Returns `MissingProperty` if there is no description, `Mismatch` if it
    /// differs.
    pub fn description_is(self, description: &str) -> Result<Self> {
        let actual = self.description()?;
        assert_equal(
            &self.subject(),
            "description",
            Some(&actual),
            &Value::from(description),
        )?;
        Ok(self)
    }

    fn description(&self) -> Result<Value> {
        let description = self.declaration.description.clone().map(Value::String);
        assert_present(&self.subject(), "description", description.as_ref()).cloned()
    }
}
