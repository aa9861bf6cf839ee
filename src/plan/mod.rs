//! Plan document model and format version dispatch.
//!
//! This module holds the typed read view over a parsed Terraform plan and
//! the registry that maps a plan's `format_version` to its decoder.

mod action;
mod types;
mod version;

pub use action::Action;
pub use types::{
    Change, ConfigModule, Configuration, ModuleNode, OutputChange, PlanDocument, PlannedOutput,
    PlannedValues, ProviderConfig, ResourceChange, ResourceState, VariableDeclaration,
    VariableValue,
};
pub use version::FormatVersion;

pub(crate) use types::present;
