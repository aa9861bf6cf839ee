//! Plan loading from JSON files and strings.
//!
//! The assertion core only ever sees an in-memory document. This module is
//! the thin collaborator that reads `terraform show -json` output and hands
//! the decoded value to [`PlanAssertions::from_value`].

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::assertions::PlanAssertions;
use crate::error::{LoadError, PlanAssertError, Result};

/// Loader for Terraform JSON plans.
#[derive(Debug, Default)]
pub struct PlanLoader;

impl PlanLoader {
    /// Creates a new plan loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not JSON, or has an
    /// unsupported format version.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<PlanAssertions> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(PlanAssertError::Load(LoadError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanAssertError::Load(LoadError::Parse {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_json(&content, Some(path))
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or has an unsupported format
    /// version.
    pub fn parse_json(&self, content: &str, source: Option<&Path>) -> Result<PlanAssertions> {
        debug!("Parsing JSON plan");

        let document: Value = serde_json::from_str(content).map_err(|e| {
            PlanAssertError::Load(LoadError::Parse {
                message: format!("JSON parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })?;

        let plan = PlanAssertions::from_value(document)?;
        debug!("Loaded plan with format version {}", plan.format_version());
        Ok(plan)
    }
}
