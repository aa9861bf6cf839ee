//! Assertions on proposed resource changes.
//!
//! A [`ResourceChangeAssert`] checks the scalar fields of one
//! `resource_changes` record and hands out snapshot accessors over the
//! `before`, `after` and `after_unknown` values of its diff.

use serde_json::Value;
use std::borrow::Cow;

use crate::error::Result;
use crate::plan::ResourceChange;

use super::expect::{EntityKind, Expectation, Subject, assert_action, assert_equal, assert_present};

/// Accessor over one resource change.
#[derive(Debug, Clone, Copy)]
pub struct ResourceChangeAssert<'a> {
    change: &'a ResourceChange,
}

/// Which value of the diff a snapshot looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    /// `change.before`
    Before,
    /// `change.after`
    After,
    /// `change.after_unknown`
    AfterUnknown,
}

/// Pending membership check on `change.actions`.
#[derive(Debug)]
#[must_use = "an expectation checks nothing until `is` is called"]
pub struct ActionExpectation<'a> {
    parent: ResourceChangeAssert<'a>,
}

/// Accessor over one snapshot of a resource change.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotAssert<'a> {
    change: &'a ResourceChange,
    snapshot: Snapshot,
}

/// Accessor over `after_unknown`, where checks default to expecting `true`.
#[derive(Debug, Clone, Copy)]
pub struct UnknownAssert<'a> {
    inner: SnapshotAssert<'a>,
}

impl<'a> ResourceChangeAssert<'a> {
    pub(crate) const fn new(change: &'a ResourceChange) -> Self {
        Self { change }
    }

    fn subject(&self) -> Subject {
        Subject::new(EntityKind::ResourceChange, &self.change.address)
    }

    /// Raw change record.
    #[must_use]
    pub const fn get(&self) -> &'a ResourceChange {
        self.change
    }

    /// Expectation on a scalar field of the record, by its JSON name.
    pub fn property(self, property: &str) -> Expectation<'a, Self> {
        let actual = self.change.scalar(property).map(Cow::Owned);
        Expectation::new(self, self.subject(), property, actual)
    }

    /// Expectation on `mode`.
    pub fn mode(self) -> Expectation<'a, Self> {
        self.property("mode")
    }

    /// Expectation on `type`.
    pub fn resource_type(self) -> Expectation<'a, Self> {
        self.property("type")
    }

    /// Expectation on `name`.
    pub fn name(self) -> Expectation<'a, Self> {
        self.property("name")
    }

    /// Expectation on `provider_name`.
    pub fn provider_name(self) -> Expectation<'a, Self> {
        self.property("provider_name")
    }

    /// Membership check on the planned actions.
    pub const fn action(self) -> ActionExpectation<'a> {
        ActionExpectation { parent: self }
    }

    /// Accessor over `change.before`.
    #[must_use]
    pub const fn before(&self) -> SnapshotAssert<'a> {
        SnapshotAssert {
            change: self.change,
            snapshot: Snapshot::Before,
        }
    }

    /// Accessor over `change.after`.
    #[must_use]
    pub const fn after(&self) -> SnapshotAssert<'a> {
        SnapshotAssert {
            change: self.change,
            snapshot: Snapshot::After,
        }
    }

    /// Accessor over `change.after_unknown`.
    #[must_use]
    pub const fn unknown(&self) -> UnknownAssert<'a> {
        UnknownAssert {
            inner: SnapshotAssert {
                change: self.change,
                snapshot: Snapshot::AfterUnknown,
            },
        }
    }
}

impl<'a> ActionExpectation<'a> {
    /// Asserts `action` is one of the planned actions.
    ///
    /// # Errors
    ///
    /// Returns `ActionNotPlanned` listing the actual actions.
    pub fn is(self, action: &str) -> Result<ResourceChangeAssert<'a>> {
        assert_action(&self.parent.subject(), &self.parent.change.change.actions, action)?;
        Ok(self.parent)
    }
}

impl Snapshot {
    /// JSON field name of the snapshot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::AfterUnknown => "after_unknown",
        }
    }
}

impl<'a> SnapshotAssert<'a> {
    fn subject(&self) -> Subject {
        Subject::new(EntityKind::ResourceChange, &self.change.address)
    }

    /// Raw snapshot value, possibly `null`.
    #[must_use]
    pub fn get(&self) -> &'a Value {
        let change = &self.change.change;
        match self.snapshot {
            Snapshot::Before => &change.before,
            Snapshot::After => &change.after,
            Snapshot::AfterUnknown => &change.after_unknown,
        }
    }

    /// Asserts the snapshot has `key` and that it equals `value`.
    ///
    /// Presence is strict: a key holding `null`, `false` or `0` is present.
    ///
    /// # Errors
    ///
    /// Returns `MissingProperty` if the snapshot is not an object or lacks
    /// `key`, `Mismatch` if the value differs.
    pub fn is(self, key: &str, value: impl Into<Value>) -> Result<Self> {
        let subject = self.subject();
        let name = self.snapshot.as_str();
        let object = assert_present(&subject, name, Some(self.get()).filter(|v| v.is_object()))?;
        assert_equal(
            &subject,
            &format!("{name}.{key}"),
            object.get(key),
            &value.into(),
        )?;
        Ok(self)
    }

    /// Asserts the snapshot is `null`.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` showing the snapshot if it is not `null`.
    pub fn is_null(self) -> Result<()> {
        assert_equal(&self.subject(), self.snapshot.as_str(), Some(self.get()), &Value::Null)
    }
}

impl<'a> UnknownAssert<'a> {
    /// Raw `after_unknown` value.
    #[must_use]
    pub fn get(&self) -> &'a Value {
        self.inner.get()
    }

    /// Asserts `key` is marked unknown until apply.
    ///
    /// # Errors
    ///
    /// Fails if `key` is absent or not `true`.
    pub fn is(self, key: &str) -> Result<Self> {
        self.is_value(key, true)
    }

    /// Asserts `key` of `after_unknown` equals `value`.
    ///
    /// # Errors
    ///
    /// Fails if `key` is absent or holds another value.
    pub fn is_value(self, key: &str, value: impl Into<Value>) -> Result<Self> {
        self.inner.is(key, value)?;
        Ok(self)
    }

    /// Asserts `after_unknown` is `null`.
    ///
    /// # Errors
    ///
    /// Returns `Mismatch` if it is not `null`.
    pub fn is_null(self) -> Result<()> {
        self.inner.is_null()
    }
}
