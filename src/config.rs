//! Configuration management
//!
//! Settings are read from `~/.config/geopush/config.toml` (or the file given
//! with `--config`). A missing file yields the defaults; every section and
//! key is optional.
//!
//! ```toml
//! [store]
//! path = "/var/lib/geopush"
//!
//! [dedup]
//! max_candidates = 100
//!
//! [server]
//! bind = "127.0.0.1:9000"
//!
//! [push]
//! default_source_type = "IMPORT"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::models::SourceType;
use crate::core::services::MAX_MESSAGE_VERSIONS;
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeopushConfig {
    /// Message store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Duplicate check settings
    #[serde(default)]
    pub dedup: DedupConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Push defaults
    #[serde(default)]
    pub push: PushConfig,
}

/// Message store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the JSON file store (defaults to the platform data dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Duplicate check settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Stored versions compared against each incoming message
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

const fn default_max_candidates() -> usize {
    MAX_MESSAGE_VERSIONS
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:9000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Push defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Source type assumed when a push names none
    #[serde(default)]
    pub default_source_type: SourceType,
}

impl GeopushConfig {
    /// Load the configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(paths::config_file, Path::to_path_buf);
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.dedup.max_candidates == 0 {
            anyhow::bail!("dedup.max_candidates must be > 0");
        }
        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }
        Ok(())
    }

    /// Directory of the JSON file store
    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(paths::data_dir)
    }
}
