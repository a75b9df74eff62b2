//! Engine configuration
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! store:
//!   delete_policy: reject     # or cascade (default)
//!   allow_self_loops: false   # default true
//! analytics:
//!   max_iterations: 50        # default 20
//!   tolerance: 1.0e-8         # default 1e-6
//! ```

use graphforge_algorithms::{PageRankConfig, DAMPING_FACTOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What happens to incident relationships when a node is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Remove every relationship that starts or ends at the node
    #[default]
    Cascade,
    /// Refuse the deletion while any incident relationship exists
    Reject,
}

/// Graph store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub delete_policy: DeletePolicy,
    /// Whether a relationship may start and end at the same node
    pub allow_self_loops: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::Cascade,
            allow_self_loops: true,
        }
    }
}

/// PageRank iteration bounds. The damping factor is fixed at 0.85.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        let pagerank = PageRankConfig::default();
        Self {
            max_iterations: pagerank.iterations,
            tolerance: pagerank.tolerance,
        }
    }
}

impl AnalyticsConfig {
    pub fn page_rank_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: DAMPING_FACTOR,
            iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub store: StoreConfig,
    pub analytics: AnalyticsConfig,
}

impl EngineConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to an empty map
        let config: EngineConfig = if yaml.trim().is_empty() {
            EngineConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.analytics.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "analytics.max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.analytics.tolerance.is_finite() || self.analytics.tolerance < 0.0 {
            return Err(ConfigError::Invalid(
                "analytics.tolerance must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.store.delete_policy, DeletePolicy::Cascade);
        assert!(config.store.allow_self_loops);
        assert_eq!(config.analytics.max_iterations, 20);
        assert_eq!(config.analytics.tolerance, 1e-6);
        assert_eq!(config.analytics.page_rank_config().damping_factor, 0.85);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("store:\n  delete_policy: reject\n").unwrap();
        assert_eq!(config.store.delete_policy, DeletePolicy::Reject);
        assert!(config.store.allow_self_loops);
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(EngineConfig::from_yaml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let err = EngineConfig::from_yaml_str("analytics:\n  max_iterations: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = EngineConfig::from_yaml_str("store:\n  delete_policy: shred\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
