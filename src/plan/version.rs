//! Plan format version dispatch.
//!
//! Each registered [`FormatVersion`] knows how to decode a raw plan document
//! into the shared [`PlanDocument`] model. Supporting a new plan schema means
//! adding a variant and its decoder here; accessors stay untouched.

use serde_json::Value;
use tracing::debug;

use crate::error::{FormatVersionError, Result};

use super::types::PlanDocument;

/// A plan `format_version` with a registered decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// The initial stable JSON plan schema.
    V0_1,
}

impl FormatVersion {
    /// Versions with a registered decoder.
    pub const REGISTERED: [Self; 1] = [Self::V0_1];

    /// Returns the version string as it appears in plan JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V0_1 => "0.1",
        }
    }

    /// Looks up the registered version for a version string.
    ///
    /// # Errors
    ///
    /// Returns `FormatVersionError::Unsupported` if nothing is registered for it.
    pub fn from_version_str(version: &str) -> Result<Self> {
        Self::REGISTERED
            .into_iter()
            .find(|v| v.as_str() == version)
            .ok_or_else(|| {
                FormatVersionError::Unsupported {
                    expected: Self::registered_list(),
                    found: version.to_string(),
                }
                .into()
            })
    }

    /// Reads `format_version` from a raw document and selects its version.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing, not a string, or unregistered.
    pub fn detect(document: &Value) -> Result<Self> {
        let found = document
            .get("format_version")
            .ok_or(FormatVersionError::Missing)?;

        let version = match found {
            Value::String(s) => Self::from_version_str(s)?,
            other => {
                return Err(FormatVersionError::Unsupported {
                    expected: Self::registered_list(),
                    found: other.to_string(),
                }
                .into());
            }
        };

        debug!("Detected plan format version {}", version.as_str());
        Ok(version)
    }

    /// Decodes a raw document with this version's decoder.
    ///
    /// # Errors
    ///
    /// Returns `FormatVersionError::InvalidDocument` if the document does not
    /// fit the version's model.
    pub fn decode(self, document: Value) -> Result<PlanDocument> {
        match self {
            Self::V0_1 => serde_json::from_value(document).map_err(|e| {
                FormatVersionError::InvalidDocument {
                    version: self.as_str().to_string(),
                    message: e.to_string(),
                }
                .into()
            }),
        }
    }

    /// Registered versions, comma separated.
    #[must_use]
    pub fn registered_list() -> String {
        Self::REGISTERED
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanAssertError;
    use serde_json::json;

    #[test]
    fn test_detect_registered_version() {
        let version = FormatVersion::detect(&json!({ "format_version": "0.1" })).expect("detect");
        assert_eq!(version, FormatVersion::V0_1);
    }

    #[test]
    fn test_detect_unsupported_version() {
        let err = FormatVersion::detect(&json!({ "format_version": "1.2" })).unwrap_err();
        match err {
            PlanAssertError::FormatVersion(FormatVersionError::Unsupported { expected, found }) => {
                assert_eq!(expected, "0.1");
                assert_eq!(found, "1.2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_detect_missing_version() {
        let err = FormatVersion::detect(&json!({ "terraform_version": "0.12.23" })).unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::FormatVersion(FormatVersionError::Missing)
        ));
    }

    #[test]
    fn test_detect_non_string_version() {
        let err = FormatVersion::detect(&json!({ "format_version": 0.1 })).unwrap_err();
        assert!(err.to_string().contains("Actual: 0.1"));
    }

    #[test]
    fn test_decode_rejects_malformed_sections() {
        let err = FormatVersion::V0_1
            .decode(json!({ "format_version": "0.1", "resource_changes": "nope" }))
            .unwrap_err();
        assert!(matches!(
            err,
            PlanAssertError::FormatVersion(FormatVersionError::InvalidDocument { .. })
        ));
    }
}
