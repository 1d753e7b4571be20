// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! TOML configuration for the mailbox manager.
//!
//! ```toml
//! platform = "exynos9610"
//! capacity = 4
//! slot_stride = 4
//! ```
//!
//! `capacity` overrides the platform default; every key is optional.

use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::error::MboxError;
use crate::platform::{PoolLayout, SocProfile, DEFAULT_SLOT_STRIDE};

/// Environment variable naming the active configuration file.
pub const CONFIG_ENV: &str = "MIFMBOX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("parsing mailbox config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid mailbox layout: {0}")]
    Layout(#[from] MboxError),
}

/// Raw configuration as written on disk.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MboxConfig {
    #[serde(default)]
    pub platform: SocProfile,
    pub capacity: Option<usize>,
    pub slot_stride: Option<usize>,
}

impl MboxConfig {
    /// Parse configuration text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve to a validated layout.
    pub fn layout(&self) -> Result<PoolLayout, ConfigError> {
        let capacity = self.capacity.unwrap_or_else(|| self.platform.mbox_count());
        let stride = self.slot_stride.unwrap_or(DEFAULT_SLOT_STRIDE);
        Ok(PoolLayout::new(capacity, stride)?)
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<PoolLayout, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    MboxConfig::from_toml(&text)?.layout()
}

/// Load the layout named by `MIFMBOX_CONFIG`, falling back to the generic
/// profile when the variable is unset or the file is unusable.
pub fn load_active() -> PoolLayout {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return PoolLayout::default();
    };
    match load_config(Path::new(&path)) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("mifmbox: using default layout: {e}");
            PoolLayout::default()
        }
    }
}
