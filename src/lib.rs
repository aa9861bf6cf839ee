// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfplan-assert
//!
//! Fluent assertions over the JSON document produced by
//! `terraform show -json <planfile>`.
//!
//! ## Overview
//!
//! A plan is decoded once, dispatched on its `format_version`, and then
//! queried through small accessors that each wrap one resolved entry:
//!
//! - Input variables and planned outputs
//! - Planned resources, navigated through the module tree
//! - Resource changes with their `before`, `after` and `after_unknown` values
//! - Output changes
//! - Provider configuration and declared variables
//!
//! Every check either returns an accessor to chain the next check on, or
//! fails with a [`PlanAssertError`] that names the entity, its key, the
//! property and both values.
//!
//! ## Modules
//!
//! - [`plan`]: Typed plan model and format version registry
//! - [`assertions`]: The fluent accessors
//! - [`loader`]: Reading plans from JSON files
//! - [`expectations`]: Declarative YAML expectation files
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use tfplan_assert::{PlanLoader, Result};
//!
//! fn check() -> Result<()> {
//!     let plan = PlanLoader::new().load_file("tfplan.json")?;
//!
//!     plan.variable("LOCATION")?.is("uksouth")?;
//!     plan.resource_change("azurerm_resource_group.rg")?
//!         .action()
//!         .is("create")?
//!         .after()
//!         .is("location", "uksouth")?;
//!     Ok(())
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod assertions;
pub mod cli;
pub mod error;
pub mod expectations;
pub mod loader;
pub mod plan;

// ============================================================================
// Re-exports
// ============================================================================

pub use assertions::{Expectation, PlanAssertions};
pub use cli::{Cli, Commands, OutputFormatter};
pub use error::{PlanAssertError, Result};
pub use expectations::{
    ExpectationFile, ExpectationParser, ExpectationRunner, ExpectationValidator, RunSummary,
};
pub use loader::PlanLoader;
pub use plan::{Action, FormatVersion, PlanDocument};

/// Builds assertions over an already decoded plan document.
///
/// # Errors
///
/// Fails if `format_version` is missing or unsupported, or the document does
/// not fit the registered model.
pub fn plan_assertions(document: &serde_json::Value) -> Result<PlanAssertions> {
    PlanAssertions::from_value(document.clone())
}
