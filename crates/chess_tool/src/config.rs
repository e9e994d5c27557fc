//! Tool configuration, read from TOML and then overridden from the command
//! line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Read from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "chess_tool.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// `tracing` filter directives, used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Print reports as JSON instead of text.
    pub json: bool,
    /// Ply cap for random playouts.
    pub max_plies: usize,
    /// Seed for random playouts.
    pub seed: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            json: false,
            max_plies: 300,
            seed: 0,
        }
    }
}

/// Values given on the command line. `None` (or `false`) leaves the
/// configured value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_filter: Option<String>,
    pub json: bool,
    pub max_plies: Option<usize>,
    pub seed: Option<u64>,
}

impl ToolConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid chess_tool configuration")
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_PATH`] if it exists, else
    /// the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(filter) = overrides.log_filter {
            self.log_filter = filter;
        }
        if overrides.json {
            self.json = true;
        }
        if let Some(max_plies) = overrides.max_plies {
            self.max_plies = max_plies;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
