//! Fluent assertion accessors over a decoded plan.
//!
//! Every accessor wraps one resolved entry of the plan and exposes property
//! checks. A check either returns the accessor (or its parent) so that the
//! next check can be chained with `?`, or fails with a
//! [`PlanAssertError`](crate::PlanAssertError).
//!
//! ```ignore
//! plan.planned_values()?
//!     .root_module()?
//!     .resource("azurerm_resource_group.rg")?
//!     .mode().is("managed")?
//!     .value("location").is("uksouth")?;
//! ```

mod config_variable;
mod configuration;
mod expect;
mod lookup;
mod module;
mod output;
mod output_change;
mod plan;
mod provider;
mod resource;
mod resource_change;
mod variable;

pub use config_variable::ConfigVariableAssert;
pub use configuration::ConfigurationAssert;
pub use expect::{EntityKind, Expectation, Subject, values_equal};
pub use module::{ChildModules, ModuleAssert};
pub use output::OutputAssert;
pub use output_change::{OutputChangeAssert, OutputChangesAssert};
pub use plan::{PlanAssertions, PlannedValuesAssert};
pub use provider::ProviderAssert;
pub use resource::ResourceAssert;
pub use resource_change::{
    ActionExpectation, ResourceChangeAssert, Snapshot, SnapshotAssert, UnknownAssert,
};
pub use variable::VariableAssert;
