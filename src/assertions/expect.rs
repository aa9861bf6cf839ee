//! Equality and presence primitives shared by every accessor.
//!
//! These functions never log. They either return or fail with an
//! [`AssertionError`] naming the entity, its key, the property, and both the
//! expected and actual values.

use serde_json::Value;
use std::borrow::Cow;

use crate::error::{AssertionError, Result};

/// Kind of plan entity an assertion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The plan document itself.
    Plan,
    /// An input variable value.
    Variable,
    /// A planned output.
    Output,
    /// A planned module.
    Module,
    /// A planned resource.
    Resource,
    /// A resource change.
    ResourceChange,
    /// An output change.
    OutputChange,
    /// A provider configuration block.
    Provider,
    /// A variable declared in configuration.
    ConfigVariable,
}

/// The entity an assertion is about: its kind plus its name or address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Entity kind.
    pub kind: EntityKind,
    /// Name or address.
    pub key: String,
}

impl Subject {
    /// Creates a new subject.
    #[must_use]
    pub fn new(kind: EntityKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    fn mismatch(&self, property: &str, expected: &Value, actual: &Value) -> AssertionError {
        AssertionError::Mismatch {
            entity: self.kind.to_string(),
            key: self.key.clone(),
            property: property.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    fn missing(&self, property: &str) -> AssertionError {
        AssertionError::MissingProperty {
            entity: self.kind.to_string(),
            key: self.key.clone(),
            property: property.to_string(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Plan => "plan",
            Self::Variable => "variable",
            Self::Output => "output",
            Self::Module => "module",
            Self::Resource => "resource",
            Self::ResourceChange => "resource change",
            Self::OutputChange => "output change",
            Self::Provider => "provider",
            Self::ConfigVariable => "configuration variable",
        };
        write!(f, "{s}")
    }
}

/// Compares two plan values.
///
/// Scalars compare by value, with numbers compared numerically so that `1`
/// and `1.0` are equal. Two integers compare exactly. Arrays and objects compare structurally.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            // Integers compare exactly; only a float on either side widens to f64.
            a == b
                || ((a.is_f64() || b.is_f64())
                    && matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => actual == expected,
    }
}

/// Fails with `MissingProperty` when `value` is absent.
pub(crate) fn assert_present<'v>(
    subject: &Subject,
    property: &str,
    value: Option<&'v Value>,
) -> Result<&'v Value> {
    value.ok_or_else(|| subject.missing(property).into())
}

/// Fails when `actual` is absent or differs from `expected`.
pub(crate) fn assert_equal(
    subject: &Subject,
    property: &str,
    actual: Option<&Value>,
    expected: &Value,
) -> Result<()> {
    let actual = assert_present(subject, property, actual)?;
    if values_equal(actual, expected) {
        Ok(())
    } else {
        Err(subject.mismatch(property, expected, actual).into())
    }
}

/// Fails when `expected` is not one of `actions`.
pub(crate) fn assert_action(subject: &Subject, actions: &[String], expected: &str) -> Result<()> {
    if actions.iter().any(|a| a == expected) {
        return Ok(());
    }
    Err(AssertionError::ActionNotPlanned {
        entity: subject.kind.to_string(),
        key: subject.key.clone(),
        actions: actions.join(", "),
        expected: expected.to_string(),
    }
    .into())
}

/// A pending check of one property; `is` returns the parent accessor.
#[derive(Debug)]
#[must_use = "an expectation checks nothing until `is` is called"]
pub struct Expectation<'a, P> {
    parent: P,
    subject: Subject,
    property: String,
    actual: Option<Cow<'a, Value>>,
}

impl<'a, P> Expectation<'a, P> {
    pub(crate) fn new(
        parent: P,
        subject: Subject,
        property: impl Into<String>,
        actual: Option<Cow<'a, Value>>,
    ) -> Self {
        Self {
            parent,
            subject,
            property: property.into(),
            actual,
        }
    }

    /// Asserts the property equals `expected` and hands back the parent.
    ///
    /// # Errors
    ///
    /// Returns `MissingProperty` if the property is absent, `Mismatch` if it
    /// holds another value.
    pub fn is(self, expected: impl Into<Value>) -> Result<P> {
        assert_equal(
            &self.subject,
            &self.property,
            self.actual.as_deref(),
            &expected.into(),
        )?;
        Ok(self.parent)
    }

    /// Returns the raw property value for assertions the chain cannot express.
    ///
    /// # Errors
    ///
    /// Returns `MissingProperty` if the property is absent.
    pub fn get(self) -> Result<Cow<'a, Value>> {
        match self.actual {
            Some(value) => Ok(value),
            None => Err(self.subject.missing(&self.property).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanAssertError;
    use rstest::rstest;
    use serde_json::json;

    fn subject() -> Subject {
        Subject::new(EntityKind::Resource, "azurerm_resource_group.rg")
    }

    #[rstest]
    #[case(json!("uksouth"), json!("uksouth"), true)]
    #[case(json!("uksouth"), json!("westus"), false)]
    #[case(json!(0), json!(0.0), true)]
    #[case(json!(1), json!(2), false)]
    #[case(json!(9_007_199_254_740_993_u64), json!(9_007_199_254_740_992_u64), false)]
    #[case(json!(-9_007_199_254_740_993_i64), json!(-9_007_199_254_740_992_i64), false)]
    #[case(json!(null), json!(null), true)]
    #[case(json!(false), json!(null), false)]
    #[case(json!({"a": [1, {"b": true}]}), json!({"a": [1.0, {"b": true}]}), true)]
    #[case(json!({"a": 1}), json!({"a": 1, "b": 2}), false)]
    #[case(json!([1, 2]), json!([2, 1]), false)]
    fn test_values_equal(#[case] actual: Value, #[case] expected: Value, #[case] equal: bool) {
        assert_eq!(values_equal(&actual, &expected), equal);
    }

    #[test]
    fn test_mismatch_message_names_everything() {
        let err = assert_equal(&subject(), "location", Some(&json!("uksouth")), &json!("westus"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("resource azurerm_resource_group.rg location"));
        assert!(message.contains("\"westus\""));
        assert!(message.contains("\"uksouth\""));
    }

    #[test]
    fn test_missing_value_is_not_null() {
        let err = assert_equal(&subject(), "timeouts", None, &Value::Null).unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::Assertion(AssertionError::MissingProperty { .. })
        ));
        assert!(assert_equal(&subject(), "timeouts", Some(&Value::Null), &Value::Null).is_ok());
    }

    #[test]
    fn test_assert_action() {
        let actions = vec![String::from("delete"), String::from("create")];
        assert!(assert_action(&subject(), &actions, "create").is_ok());

        let err = assert_action(&subject(), &actions, "update").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed: Actions for resource azurerm_resource_group.rg are: [delete, create]. Expected to find: update"
        );
    }

    #[test]
    fn test_expectation_returns_parent() {
        let parent = 7_u8;
        let expectation = Expectation::new(parent, subject(), "mode", Some(Cow::Owned(json!("managed"))));
        assert_eq!(expectation.is("managed").expect("matches"), 7);
    }

    #[test]
    fn test_expectation_get_missing() {
        let expectation: Expectation<'_, ()> = Expectation::new((), subject(), "tags", None);
        assert!(expectation.get().unwrap_err().is_assertion_failure());
    }
}
