//! Policy loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading the working-day
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::SchedulePolicy;

/// Loads and provides access to the working-day policy.
///
/// # Example
///
/// ```no_run
/// use closing_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/schedule_policy.yaml").unwrap();
/// let policy = loader.policy();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyLoader {
    policy: SchedulePolicy,
}

impl PolicyLoader {
    /// Loads the policy from a YAML file.
    ///
    /// Returns an error if the file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Parses the policy from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let policy: SchedulePolicy =
            serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Consumes the loader and returns the policy.
    pub fn into_policy(self) -> SchedulePolicy {
        self.policy
    }
}
