//! Assertions on provider configuration blocks.

use serde_json::Value;
use std::borrow::Cow;

use crate::plan::ProviderConfig;

use super::expect::{EntityKind, Expectation, Subject};

/// Accessor over one entry of `configuration.provider_config`.
#[derive(Debug, Clone, Copy)]
pub struct ProviderAssert<'a> {
    name: &'a str,
    provider: &'a ProviderConfig,
}

impl<'a> ProviderAssert<'a> {
    pub(crate) const fn new(name: &'a str, provider: &'a ProviderConfig) -> Self {
        Self { name, provider }
    }

    /// Key of the provider block in the plan.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.name
    }

    /// Raw property passthrough; no assertion is made.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&'a Value> {
        self.provider.get(property)
    }

    /// Expectation on any property of the block.
    pub fn property(self, property: &str) -> Expectation<'a, Self> {
        Expectation::new(
            self,
            Subject::new(EntityKind::Provider, self.name),
            property,
            self.provider.get(property).map(Cow::Borrowed),
        )
    }

    /// Expectation on `name`.
    pub fn name(self) -> Expectation<'a, Self> {
        self.property("name")
    }

    /// Expectation on `version_constraint`.
    pub fn version_constraint(self) -> Expectation<'a, Self> {
        self.property("version_constraint")
    }
}
