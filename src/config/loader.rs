//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the balance
//! rules from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::PairPolicy;

use super::types::{EngineConfig, EngineFile, EngineMetadata, OvertimeConfig};

/// Loads and provides access to the balance rules.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Rule set metadata and record screening
/// └── overtime.yaml  # Tier limit and premium multipliers
/// ```
///
/// # Example
///
/// ```no_run
/// use workday_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Tier limit: {} minutes", loader.tier_limit_minutes());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, is not valid YAML, or holds
    /// values the engine cannot work with (a zero tier limit or a
    /// non-positive multiplier).
    ///
    /// ```no_run
    /// use workday_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), workday_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineFile>(&path.join("engine.yaml"))?;
        let overtime = Self::load_yaml::<OvertimeConfig>(&path.join("overtime.yaml"))?;

        let config = EngineConfig::new(engine.metadata, engine.records, overtime)?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the overtime tiers.
    pub fn overtime(&self) -> &OvertimeConfig {
        self.config.overtime()
    }

    /// Daily overtime minutes paid at the 50% premium.
    pub fn tier_limit_minutes(&self) -> u32 {
        self.config.overtime().tier_limit_minutes
    }

    /// The policy for half-filled clock pairs.
    pub fn pair_policy(&self) -> PairPolicy {
        self.config.records().incomplete_pairs
    }
}
