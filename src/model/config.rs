use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Groups with more members than this collapse into a placeholder.
pub const DEFAULT_THRESHOLD: usize = 1;

/// Settings that shape how groups are presented.
///
/// Unspecified fields fall back to their defaults, so an empty document is a
/// valid configuration.
///
/// # Examples
///
/// ```
/// use recipe_groups::GroupingConfig;
///
/// let config = GroupingConfig::from_yaml_str("threshold: 2")?;
/// assert_eq!(config.threshold, 2);
/// assert!(config.collapses(3));
/// assert!(!config.collapses(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Largest group size still rendered as plain entries. `0` turns every
    /// group, including single-member ones, into a placeholder.
    pub threshold: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        GroupingConfig {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl GroupingConfig {
    pub fn with_threshold(threshold: usize) -> Self {
        GroupingConfig { threshold }
    }

    /// Returns true if a group of `member_count` recipes renders as a placeholder.
    pub fn collapses(&self, member_count: usize) -> bool {
        member_count > self.threshold
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}
