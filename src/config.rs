//! Configuration for the render helpers and the inspector
//!
//! Loaded from a TOML file; any field left out takes its default.
//!
//! ```toml
//! force_dev = false
//! full_path = false
//! script_path = "js/srcspot.js"
//! storage_key = "srcspot.enabled"
//! ack_duration_ms = 1500
//!
//! [tooltip]
//! offset = 15
//! width = 350
//! height = 150
//! ```

use crate::attribution::DEFAULT_SCRIPT_PATH;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Storage key under which the inspector persists its enabled flag
pub const DEFAULT_STORAGE_KEY: &str = "srcspot.enabled";

/// How long the copy acknowledgment stays on screen
pub const DEFAULT_ACK_DURATION_MS: u64 = 1500;

/// Tooltip placement parameters
///
/// The width and height are the assumed tooltip size used for the overflow
/// check, not a measured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Distance from the pointer on both axes
    pub offset: i32,
    /// Assumed tooltip width
    pub width: i32,
    /// Assumed tooltip height
    pub height: i32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset: 15,
            width: 350,
            height: 150,
        }
    }
}

/// srcspot configuration
///
/// # Example
/// ```
/// use srcspot::config::Config;
///
/// let config = Config::default();
/// assert!(!config.force_dev);
/// assert_eq!(config.tooltip.offset, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat every host as a development host
    pub force_dev: bool,

    /// Emit full paths instead of base names from `Emitter::attr`
    pub full_path: bool,

    /// Script location used by `Emitter::script_tag`
    pub script_path: String,

    /// Key for the persisted enabled flag
    pub storage_key: String,

    /// Lifetime of the copy acknowledgment
    pub ack_duration_ms: u64,

    pub tooltip: TooltipConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_dev: false,
            full_path: false,
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ack_duration_ms: DEFAULT_ACK_DURATION_MS,
            tooltip: TooltipConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.script_path.trim().is_empty() {
            return Err(Error::InvalidConfig("script_path must not be empty".into()));
        }

        if self.storage_key.trim().is_empty() {
            return Err(Error::InvalidConfig("storage_key must not be empty".into()));
        }

        if self.tooltip.offset < 0 {
            return Err(Error::InvalidConfig(format!(
                "tooltip.offset must be >= 0, got {}",
                self.tooltip.offset
            )));
        }

        if self.tooltip.width <= 0 || self.tooltip.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "tooltip size must be positive, got {}x{}",
                self.tooltip.width, self.tooltip.height
            )));
        }

        Ok(())
    }
}
