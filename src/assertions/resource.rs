//! Assertions on planned resources.

use serde_json::Value;
use std::borrow::Cow;

use crate::plan::ResourceState;

use super::expect::{EntityKind, Expectation, Subject};

/// Accessor over one planned resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceAssert<'a> {
    resource: &'a ResourceState,
}

impl<'a> ResourceAssert<'a> {
    pub(crate) const fn new(resource: &'a ResourceState) -> Self {
        Self { resource }
    }

    fn expectation(self, property: &str, actual: Option<Value>) -> Expectation<'a, Self> {
        Expectation::new(
            self,
            Subject::new(EntityKind::Resource, &self.resource.address),
            property,
            actual.map(Cow::Owned),
        )
    }

    /// Raw resource record.
    #[must_use]
    pub const fn get(&self) -> &'a ResourceState {
        self.resource
    }

    /// Resource address.
    #[must_use]
    pub fn address(&self) -> &'a str {
        &self.resource.address
    }

    /// Expectation on `mode`.
    pub fn mode(self) -> Expectation<'a, Self> {
        self.expectation("mode", self.resource.mode.clone().map(Value::String))
    }

    /// Expectation on `name`.
    pub fn name(self) -> Expectation<'a, Self> {
        self.expectation("name", self.resource.name.clone().map(Value::String))
    }

    /// Expectation on `type`.
    pub fn resource_type(self) -> Expectation<'a, Self> {
        self.expectation("type", self.resource.resource_type.clone().map(Value::String))
    }

    /// Expectation on `provider_name`.
    pub fn provider_name(self) -> Expectation<'a, Self> {
        self.expectation(
            "provider_name",
            self.resource.provider_name.clone().map(Value::String),
        )
    }

    /// Expectation on `schema_version`.
    pub fn schema_version(self) -> Expectation<'a, Self> {
        self.expectation("schema_version", self.resource.schema_version.map(Value::from))
    }

    /// Expectation on one attribute of `values`.
    pub fn value(self, key: &str) -> Expectation<'a, Self> {
        Expectation::new(
            self,
            Subject::new(EntityKind::Resource, &self.resource.address),
            key,
            self.resource.values.get(key).map(Cow::Borrowed),
        )
    }
}
