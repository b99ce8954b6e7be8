//! Repository configuration
//!
//! Stored as TOML at `.twig/config`:
//!
//! ```toml
//! [core]
//! format_version = 0
//! ```

use crate::errors::TwigError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Only repository format this build understands
pub const SUPPORTED_FORMAT_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepositoryConfig {
    pub core: CoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    pub format_version: u32,
}

impl RepositoryConfig {
    /// Read and validate the config file at `path`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Err(TwigError::Format("configuration file missing".to_string()).into());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: RepositoryConfig = toml::from_str(&contents)
            .map_err(|e| TwigError::Format(format!("invalid configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TwigError::Format(format!("invalid configuration: {}", e)))?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config at {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.core.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(TwigError::UnsupportedVersion(self.core.format_version).into());
        }

        Ok(())
    }
}
