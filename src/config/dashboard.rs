//! Dashboard polling and bot catalog configuration

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Polling cadence and the bots that accept a model choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seconds between health polls
    pub poll_interval_seconds: u64,
    /// Bots that take a `{"model": ...}` header line
    pub model_selection_bots: Vec<String>,
    /// Models offered by the model-select control; the first is preselected
    pub models: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 30,
            model_selection_bots: vec!["enterprise".to_string(), "app-creator".to_string()],
            models: vec!["GPT-4".to_string(), "Claude-3-Opus".to_string()],
        }
    }
}

impl DashboardConfig {
    /// Model-selection bots as a lookup set.
    pub fn model_selection_set(&self) -> HashSet<String> {
        self.model_selection_bots.iter().cloned().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "dashboard.poll_interval_seconds".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }
        if self.models.is_empty() {
            return Err(ConfigError::Validation {
                field: "dashboard.models".to_string(),
                message: "at least one model is required".to_string(),
            });
        }
        if let Some(i) = self.models.iter().position(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation {
                field: format!("dashboard.models[{}]", i),
                message: "model name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
