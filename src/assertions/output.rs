//! Assertions on planned outputs.

use serde_json::Value;
use std::borrow::Cow;

use crate::error::Result;
use crate::plan::PlannedOutput;

use super::expect::{EntityKind, Expectation, Subject, assert_equal};

/// Accessor over one planned output.
#[derive(Debug, Clone, Copy)]
pub struct OutputAssert<'a> {
    name: &'a str,
    output: &'a PlannedOutput,
}

impl<'a> OutputAssert<'a> {
    pub(crate) const fn new(name: &'a str, output: &'a PlannedOutput) -> Self {
        Self { name, output }
    }

    fn subject(&self) -> Subject {
        Subject::new(EntityKind::Output, self.name)
    }

    fn sensitive_is(self, expected: bool) -> Result<Self> {
        let actual = self.output.sensitive.map(Value::Bool);
        assert_equal(&self.subject(), "sensitive", actual.as_ref(), &Value::Bool(expected))?;
        Ok(self)
    }

    /// Output name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Asserts the output is flagged sensitive.
    ///
    /// # Errors
    ///
    /// Fails if the flag is `false` or absent.
    pub fn is_sensitive(self) -> Result<Self> {
        self.sensitive_is(true)
    }

    /// Asserts the output is flagged not sensitive.
    ///
    /// # Errors
    ///
    /// Fails if the flag is `true` or absent.
    pub fn is_not_sensitive(self) -> Result<Self> {
        self.sensitive_is(false)
    }

    /// Expectation on the planned value; absent when only known after apply.
    pub fn value(self) -> Expectation<'a, Self> {
        let actual = self.output.value.as_ref().map(Cow::Borrowed);
        Expectation::new(self, self.subject(), "value", actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssertionError, PlanAssertError};
    use serde_json::json;

    fn output(value: Value) -> PlannedOutput {
        serde_json::from_value(value).expect("decode")
    }

    #[test]
    fn test_sensitivity_is_strict() {
        let flagged = output(json!({ "sensitive": false }));
        let assert = OutputAssert::new("ID", &flagged);
        assert!(assert.is_not_sensitive().is_ok());
        assert!(assert.is_sensitive().unwrap_err().is_assertion_failure());

        let unflagged = output(json!({}));
        let err = OutputAssert::new("ID", &unflagged).is_not_sensitive().unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::Assertion(AssertionError::MissingProperty { .. })
        ));
    }

    #[test]
    fn test_output_value() {
        let planned = output(json!({ "sensitive": false, "value": "rg-id" }));
        let assert = OutputAssert::new("ID", &planned);
        assert!(assert.value().is("rg-id").and_then(OutputAssert::is_not_sensitive).is_ok());

        let unknown = output(json!({ "sensitive": false }));
        assert!(OutputAssert::new("ID", &unknown).value().is("rg-id").is_err());
    }

    #[test]
    fn test_null_value_is_present() {
        let planned = output(json!({ "sensitive": false, "value": null }));
        assert!(OutputAssert::new("X", &planned).value().is(Value::Null).is_ok());

        let unknown = output(json!({ "sensitive": false }));
        let err = OutputAssert::new("X", &unknown).value().is(Value::Null).unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::Assertion(AssertionError::MissingProperty { .. })
        ));
    }
}
