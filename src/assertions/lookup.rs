//! Keyed and addressed lookups into plan collections.

use std::collections::HashMap;

use crate::error::{LookupError, Result};
use crate::plan::{ModuleNode, ResourceChange, ResourceState};

/// A plan collection that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Variables,
    PlannedValues,
    Outputs,
    RootModule,
    PlannedResources,
    ChildModules,
    ResourceChanges,
    OutputChanges,
    Configuration,
    Providers,
    ConfigVariables,
}

impl Collection {
    /// Name used when the whole collection is missing.
    pub(crate) const fn plural(self) -> &'static str {
        match self {
            Self::Variables => "variables",
            Self::PlannedValues => "planned values",
            Self::Outputs => "planned outputs",
            Self::RootModule => "root module",
            Self::PlannedResources => "planned resources",
            Self::ChildModules => "child modules",
            Self::ResourceChanges => "resource changes",
            Self::OutputChanges => "output changes",
            Self::Configuration => "configuration",
            Self::Providers => "provider configurations",
            Self::ConfigVariables => "configuration variables",
        }
    }

    /// Name used when a single entry is missing.
    pub(crate) const fn singular(self) -> &'static str {
        match self {
            Self::Variables => "variable",
            Self::Outputs => "output",
            Self::PlannedResources => "resource",
            Self::ChildModules => "child module",
            Self::ResourceChanges => "change to resource",
            Self::OutputChanges => "output change",
            Self::Providers => "provider",
            Self::ConfigVariables => "configuration variable",
            other => other.plural(),
        }
    }
}

/// An entry identified by an `address` field.
pub(crate) trait Addressed {
    fn address(&self) -> &str;
}

impl Addressed for ResourceState {
    fn address(&self) -> &str {
        &self.address
    }
}

impl Addressed for ResourceChange {
    fn address(&self) -> &str {
        &self.address
    }
}

impl Addressed for ModuleNode {
    fn address(&self) -> &str {
        self.address_or_root()
    }
}

/// Requires a plan section to be present.
pub(crate) fn require<T>(section: Option<&T>, collection: Collection) -> Result<&T> {
    section.ok_or_else(|| LookupError::absent(collection.plural()).into())
}

/// Resolves an entry of a name-keyed collection, returning its stored key too.
pub(crate) fn resolve_named<'a, T>(
    entries: Option<&'a HashMap<String, T>>,
    key: &str,
    collection: Collection,
) -> Result<(&'a str, &'a T)> {
    require(entries, collection)?
        .get_key_value(key)
        .map(|(k, v)| (k.as_str(), v))
        .ok_or_else(|| LookupError::not_found(collection.singular(), key).into())
}

/// Resolves the single entry of a list whose `address` equals `address`.
///
/// Zero matches is `NotFound`; more than one is `Ambiguous`.
pub(crate) fn resolve_addressed<'a, T: Addressed>(
    entries: Option<&'a Vec<T>>,
    address: &str,
    collection: Collection,
) -> Result<&'a T> {
    let mut matches = require(entries, collection)?
        .iter()
        .filter(|e| e.address() == address);

    match (matches.next(), matches.count()) {
        (Some(entry), 0) => Ok(entry),
        (None, _) => Err(LookupError::not_found(collection.singular(), address).into()),
        (Some(_), extra) => Err(LookupError::Ambiguous {
            collection: collection.plural().to_string(),
            key: address.to_string(),
            count: extra + 1,
        }
        .into()),
    }
}
