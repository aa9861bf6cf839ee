//! Typed read model of a Terraform JSON plan.
//!
//! These types mirror the `format_version` 0.1 plan schema. Sections the plan
//! may omit are `Option`s so that a missing section can be reported as such
//! instead of failing to decode. Open property bags stay as `serde_json`
//! maps, which keep document order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Root of a parsed plan document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Plan schema version.
    pub format_version: String,
    /// Terraform version that produced the plan.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Input variable values, keyed by name.
    #[serde(default)]
    pub variables: Option<HashMap<String, VariableValue>>,
    /// Values resources and outputs will have after apply.
    #[serde(default)]
    pub planned_values: Option<PlannedValues>,
    /// Proposed resource changes, in plan order.
    #[serde(default)]
    pub resource_changes: Option<Vec<ResourceChange>>,
    /// Proposed output changes, keyed by output name.
    #[serde(default)]
    pub output_changes: Option<HashMap<String, OutputChange>>,
    /// Static configuration as authored.
    #[serde(default)]
    pub configuration: Option<Configuration>,
}

/// Value supplied for an input variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableValue {
    /// The variable value.
    #[serde(default)]
    pub value: Value,
}

/// The `planned_values` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedValues {
    /// Planned outputs, keyed by name.
    #[serde(default)]
    pub outputs: Option<HashMap<String, PlannedOutput>>,
    /// Root of the planned module tree.
    #[serde(default)]
    pub root_module: Option<ModuleNode>,
}

/// A planned output value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedOutput {
    /// Sensitivity flag. Absence is not the same as `false`.
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Planned value; absent when unknown until apply. An explicit `null`
    /// is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A node of the planned module tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Module address; the root module has none.
    #[serde(default)]
    pub address: Option<String>,
    /// Resources declared directly in this module.
    #[serde(default)]
    pub resources: Option<Vec<ResourceState>>,
    /// Immediate child modules.
    #[serde(default)]
    pub child_modules: Option<Vec<ModuleNode>>,
}

/// Planned state of a single resource instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    /// Absolute resource address.
    pub address: String,
    /// `managed` or `data`.
    #[serde(default)]
    pub mode: Option<String>,
    /// Resource type.
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    /// Resource name.
    #[serde(default)]
    pub name: Option<String>,
    /// Instance key for `count`/`for_each` resources.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    /// Provider responsible for the resource.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Provider schema version of `values`.
    #[serde(default)]
    pub schema_version: Option<u64>,
    /// Attribute values.
    #[serde(default)]
    pub values: Map<String, Value>,
}

/// One entry of `resource_changes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Absolute resource address.
    pub address: String,
    /// Address of the containing module, absent for the root module.
    #[serde(default)]
    pub module_address: Option<String>,
    /// `managed` or `data`.
    #[serde(default)]
    pub mode: Option<String>,
    /// Resource type.
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    /// Resource name.
    #[serde(default)]
    pub name: Option<String>,
    /// Instance key for `count`/`for_each` resources.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    /// Deposed object key, if the change targets a deposed object.
    #[serde(default)]
    pub deposed: Option<String>,
    /// Provider responsible for the resource.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// The proposed diff.
    pub change: Change,
}

/// A proposed diff: actions plus before/after snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    /// Planned actions (`create`, `update`, `delete`, `read`, `no-op`).
    #[serde(default)]
    pub actions: Vec<String>,
    /// Value before the change, `null` when created.
    #[serde(default)]
    pub before: Value,
    /// Value after the change, `null` when deleted.
    #[serde(default)]
    pub after: Value,
    /// Parts of `after` only known after apply.
    #[serde(default)]
    pub after_unknown: Value,
}

/// Output changes share the diff shape of resource changes.
pub type OutputChange = Change;

/// The `configuration` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Provider blocks, keyed by provider name.
    #[serde(default)]
    pub provider_config: Option<HashMap<String, ProviderConfig>>,
    /// Root module declarations.
    #[serde(default)]
    pub root_module: Option<ConfigModule>,
}

/// A provider configuration block, kept as an open property bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(pub Map<String, Value>);

/// Declarations of a configuration module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigModule {
    /// Variable declarations, keyed by name.
    #[serde(default)]
    pub variables: Option<HashMap<String, VariableDeclaration>>,
}

/// A variable as declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Declared default; absent and `null` both read as `null`.
    #[serde(default)]
    pub default: Option<Value>,
    /// Declared description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ProviderConfig {
    /// Returns a property, or `None` when the block does not set it.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }
}

impl ModuleNode {
    /// Returns the module address, `root` for the root module.
    #[must_use]
    pub fn address_or_root(&self) -> &str {
        self.address.as_deref().unwrap_or("root")
    }
}

impl ResourceChange {
    /// Returns a scalar field of the change record by its JSON name.
    ///
    /// Fields of the nested `change` object are not reachable here.
    #[must_use]
    pub fn scalar(&self, property: &str) -> Option<Value> {
        let text = |v: &Option<String>| v.clone().map(Value::String);
        match property {
            "address" => Some(Value::String(self.address.clone())),
            "module_address" => text(&self.module_address),
            "mode" => text(&self.mode),
            "type" => text(&self.resource_type),
            "name" => text(&self.name),
            "provider_name" => text(&self.provider_name),
            "deposed" => text(&self.deposed),
            "index" => self.index.clone(),
            _ => None,
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing field is `None`.
pub(crate) fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
