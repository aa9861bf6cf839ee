//! Error types for Terraform plan assertions.
//!
//! Every broken expectation surfaces as a single [`PlanAssertError`]. The
//! variants are grouped by family: format version dispatch, keyed lookups,
//! property assertions, plan loading, and expectation files.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for plan assertions.
#[derive(Debug, Error)]
pub enum PlanAssertError {
    /// The plan's format version could not be dispatched.
    #[error("Format version error: {0}")]
    FormatVersion(#[from] FormatVersionError),

    /// A keyed or addressed lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// A resolved value did not meet the expectation.
    #[error("Assertion failed: {0}")]
    Assertion(#[from] AssertionError),

    /// A plan file could not be loaded.
    #[error("Plan load error: {0}")]
    Load(#[from] LoadError),

    /// An expectation file could not be loaded or validated.
    #[error("Expectation error: {0}")]
    Expectation(#[from] ExpectationError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Format version dispatch errors.
#[derive(Debug, Error)]
pub enum FormatVersionError {
    /// The document has no `format_version` field.
    #[error("The plan has no format_version field")]
    Missing,

    /// No handler is registered for the document's version.
    #[error("Unsupported format version. Expected: {expected}. Actual: {found}")]
    Unsupported {
        /// Registered versions, comma separated.
        expected: String,
        /// Version found in the document.
        found: String,
    },

    /// The document does not decode into the version's model.
    #[error("Plan is not a valid format version {version} document: {message}")]
    InvalidDocument {
        /// Version the document declared.
        version: String,
        /// Decoder message.
        message: String,
    },
}

/// Lookup errors for plan collections.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The whole plan section is missing.
    #[error("The plan contains no {collection}")]
    CollectionAbsent {
        /// Collection description (e.g. "variables").
        collection: String,
    },

    /// No entry matched the key.
    #[error("No {collection} {key} found in plan")]
    NotFound {
        /// Collection description.
        collection: String,
        /// Name or address that was looked up.
        key: String,
    },

    /// More than one entry matched an address.
    #[error("Address {key} matches {count} {collection}, expected exactly one")]
    Ambiguous {
        /// Collection description.
        collection: String,
        /// Address that was looked up.
        key: String,
        /// Number of matches.
        count: usize,
    },
}

/// Property assertion errors.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The property exists but holds a different value.
    #[error("Expected {entity} {key} {property} to be {expected}. Actual: {actual}")]
    Mismatch {
        /// Entity kind (resource, variable, output...).
        entity: String,
        /// Identifying name or address.
        key: String,
        /// Property name.
        property: String,
        /// Value the caller asserted.
        expected: String,
        /// Value found in the plan.
        actual: String,
    },

    /// The property is missing altogether.
    #[error("{entity} {key} has no property named {property}")]
    MissingProperty {
        /// Entity kind.
        entity: String,
        /// Identifying name or address.
        key: String,
        /// Property name.
        property: String,
    },

    /// The action set does not contain the expected action.
    #[error("Actions for {entity} {key} are: [{actions}]. Expected to find: {expected}")]
    ActionNotPlanned {
        /// Entity kind.
        entity: String,
        /// Identifying name or address.
        key: String,
        /// Planned actions, comma separated.
        actions: String,
        /// Action the caller asserted.
        expected: String,
    },
}

/// Plan loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan could not be decoded as JSON.
    #[error("Failed to parse plan: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },
}

/// Expectation file errors.
#[derive(Debug, Error)]
pub enum ExpectationError {
    /// The expectation file was not found.
    #[error("Expectation file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The expectation file could not be parsed.
    #[error("Failed to parse expectations: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Expectation validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Result type alias for plan assertions.
pub type Result<T> = std::result::Result<T, PlanAssertError>;

impl PlanAssertError {
    /// Returns true if this error is a broken property expectation.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns true if this error is a failed lookup, including ambiguous addresses.
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

impl LookupError {
    /// Creates a collection-level error.
    #[must_use]
    pub fn absent(collection: impl Into<String>) -> Self {
        Self::CollectionAbsent {
            collection: collection.into(),
        }
    }

    /// Creates a key-level error.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            key: key.into(),
        }
    }
}

impl ExpectationError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
