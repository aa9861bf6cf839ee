//! Expectation file types.
//!
//! These structs map to a `tfplan.expect.yaml` file. Each section lists
//! checks to run through the plan accessors; anything left out is not
//! checked. Maps are ordered so checks run in a stable order.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The root of an expectation file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectationFile {
    /// Required plan format version.
    #[serde(default)]
    pub format_version: Option<String>,
    /// Required Terraform version.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Input variable values, by name.
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    /// Planned outputs, by name.
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputExpectation>,
    /// Planned resources.
    #[serde(default)]
    pub resources: Vec<ResourceExpectation>,
    /// Resource changes.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChangeExpectation>,
    /// Output changes, by output name.
    #[serde(default)]
    pub output_changes: BTreeMap<String, OutputChangeExpectation>,
    /// Provider configuration blocks, by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderExpectation>,
    /// Variables declared in configuration, by name.
    #[serde(default)]
    pub config_variables: BTreeMap<String, ConfigVariableExpectation>,
}

/// Checks on a planned output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputExpectation {
    /// Required sensitivity flag.
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Required planned value; `null` is a real expectation.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub value: Option<Value>,
}

/// Checks on a planned resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceExpectation {
    /// Resource address.
    pub address: String,
    /// Child module addresses leading from the root module to the resource.
    #[serde(default)]
    pub module: Vec<String>,
    /// Required mode.
    #[serde(default)]
    pub mode: Option<String>,
    /// Required type.
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    /// Required name.
    #[serde(default)]
    pub name: Option<String>,
    /// Required provider name.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Required schema version.
    #[serde(default)]
    pub schema_version: Option<u64>,
    /// Required attribute values.
    #[serde(default)]
    pub values: Map<String, Value>,
}

/// Checks on a resource change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceChangeExpectation {
    /// Resource address.
    pub address: String,
    /// Required mode.
    #[serde(default)]
    pub mode: Option<String>,
    /// Required type.
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    /// Required name.
    #[serde(default)]
    pub name: Option<String>,
    /// Required provider name.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Actions that must all be planned.
    #[serde(default)]
    pub actions: Vec<String>,
    /// `null`, or a mapping of keys `before` must hold.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub before: Option<Value>,
    /// `null`, or a mapping of keys `after` must hold.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub after: Option<Value>,
    /// Keys that must be marked unknown until apply.
    #[serde(default)]
    pub after_unknown: Vec<String>,
}

/// Checks on an output change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputChangeExpectation {
    /// Actions that must all be planned.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Required value before the change.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub before: Option<Value>,
    /// Required value after the change.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub after: Option<Value>,
    /// Required unknown marker after the change.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub after_unknown: Option<Value>,
}

/// Checks on a provider configuration block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderExpectation {
    /// Required provider name.
    #[serde(default)]
    pub name: Option<String>,
    /// Required version constraint.
    #[serde(default)]
    pub version_constraint: Option<String>,
    /// Any other required properties.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Checks on a variable declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigVariableExpectation {
    /// Required default; `null` is a real expectation.
    #[serde(default, deserialize_with = "crate::plan::present")]
    pub default: Option<Value>,
    /// Required description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ExpectationFile {
    /// Returns true if the file asks for nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format_version.is_none()
            && self.terraform_version.is_none()
            && self.variables.is_empty()
            && self.outputs.is_empty()
            && self.resources.is_empty()
            && self.resource_changes.is_empty()
            && self.output_changes.is_empty()
            && self.providers.is_empty()
            && self.config_variables.is_empty()
    }
}
