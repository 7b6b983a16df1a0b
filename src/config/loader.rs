//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading urgency
//! thresholds and header aliases from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::parsing::{AliasOverrides, FieldSchema};

use super::types::UrgencyThresholds;

/// Loads and provides access to classification configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── thresholds.yaml  # Urgency thresholds (required)
/// └── aliases.yaml     # Header alias overrides per canonical field (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use premium_leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Mandatory retirement at {}", loader.thresholds().mandatory_retirement_age);
/// # Ok::<(), premium_leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    thresholds: UrgencyThresholds,
    schema: FieldSchema,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `thresholds.yaml` is missing
    /// - any file contains invalid YAML or unknown canonical fields
    /// - the thresholds are inconsistent
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let thresholds = Self::load_yaml::<UrgencyThresholds>(&path.join("thresholds.yaml"))?;
        thresholds.validate()?;

        let aliases_path = path.join("aliases.yaml");
        let schema = if aliases_path.exists() {
            let overrides = Self::load_yaml::<AliasOverrides>(&aliases_path)?;
            debug!(
                path = %aliases_path.display(),
                fields = overrides.0.len(),
                "Loaded header alias overrides"
            );
            FieldSchema::default().merged(overrides)
        } else {
            FieldSchema::default()
        };

        Ok(Self { thresholds, schema })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the urgency thresholds.
    pub fn thresholds(&self) -> &UrgencyThresholds {
        &self.thresholds
    }

    /// Returns the field schema with any configured alias overrides applied.
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }
}
