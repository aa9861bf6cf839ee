//! Expectation file loading.
//!
//! Expectation files are YAML. When no path is given the file is searched
//! for from a start directory upwards.

use crate::error::{ExpectationError, PlanAssertError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::schema::ExpectationFile;

/// Parser for expectation files.
#[derive(Debug, Default)]
pub struct ExpectationParser;

impl ExpectationParser {
    /// Creates a new expectation parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads expectations from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ExpectationFile> {
        let path = path.as_ref();
        info!("Loading expectations from: {}", path.display());

        if !path.exists() {
            return Err(PlanAssertError::Expectation(ExpectationError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanAssertError::Expectation(ExpectationError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses expectations from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or has unknown fields.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ExpectationFile> {
        debug!("Parsing YAML expectations");

        let file: ExpectationFile = serde_yaml::from_str(content).map_err(|e| {
            PlanAssertError::Expectation(ExpectationError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })?;

        debug!(
            "Parsed expectations: {} resources, {} resource changes",
            file.resources.len(),
            file.resource_changes.len()
        );
        Ok(file)
    }
}

/// Default expectation file names to search for.
pub const DEFAULT_EXPECTATION_FILES: &[&str] = &[
    "tfplan.expect.yaml",
    "tfplan.expect.yml",
    "plan.expect.yaml",
    "plan.expect.yml",
];

/// Finds the expectation file in `start_dir` or one of its parents.
///
/// A relative `start_dir` is resolved against the current directory first.
///
/// # Errors
///
/// Returns an error if no expectation file is found, or the current
/// directory cannot be read.
pub fn find_expectations_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let absolute = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };
    // Drops `.` components so that `pop` climbs to the real parent.
    let mut current: PathBuf = absolute.components().collect();

    loop {
        for filename in DEFAULT_EXPECTATION_FILES {
            let candidate = current.join(filename);
            if candidate.exists() {
                info!("Found expectation file: {}", candidate.display());
                return Ok(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(PlanAssertError::Expectation(ExpectationError::FileNotFound {
        path: start.join(DEFAULT_EXPECTATION_FILES[0]),
    }))
}
