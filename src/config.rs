//! Store configuration
//!
//! All fields have defaults, so an empty YAML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial capacity of the graph arena
    pub graph_capacity: usize,
    /// Initial capacity of the node arena
    pub node_capacity: usize,
    /// Initial capacity of the edge arena
    pub edge_capacity: usize,
    /// Deepest allowed subgraph nesting (root graphs are depth 0).
    /// `None` means unlimited.
    pub max_depth: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            graph_capacity: 64,
            node_capacity: 1024,
            edge_capacity: 4096,
            max_depth: None,
        }
    }
}

impl StoreConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: StoreConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1 to allow subgraphs; omit it for no limit".to_string(),
            ));
        }
        Ok(())
    }
}
