//! Optional `config.json` in the data directory.

use crate::persistence::read_file;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User preferences; every field has a default so partial files are fine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Send a desktop notification when a phase ends
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Ask before moving the timer to another task
    #[serde(default = "default_true")]
    pub confirm_switch: bool,
    /// Show the "Added / Completed" line under each task
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: true,
            confirm_switch: true,
            show_timestamps: true,
        }
    }
}

impl Config {
    /// Parse a config file; a missing file yields defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Like `from_path`, but a broken file only costs a warning
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default config");
                Self::default()
            }
        }
    }
}
