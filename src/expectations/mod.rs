//! Declarative expectation files.
//!
//! A YAML file lists what a plan must contain. It is parsed, validated for
//! obvious mistakes, and then run through the same accessors a hand-written
//! test would use.

mod parser;
mod runner;
mod schema;
mod validator;

pub use parser::{DEFAULT_EXPECTATION_FILES, ExpectationParser, find_expectations_file};
pub use runner::{ExpectationRunner, RunSummary};
pub use schema::{
    ConfigVariableExpectation, ExpectationFile, OutputChangeExpectation, OutputExpectation,
    ProviderExpectation, ResourceChangeExpectation, ResourceExpectation,
};
pub use validator::{ExpectationValidator, ValidationError, ValidationResult, is_snapshot_expectation};
