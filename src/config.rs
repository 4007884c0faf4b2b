// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the timing-table compiler.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. config.yaml file
//! 3. Environment variables (DAYTONA_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Compiler settings
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        // Load from file if specified
        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            // Try default locations
            for path in &["config.yaml", "config.yml", "/etc/daytona/config.yaml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("DAYTONA_NAME_TABLE") {
            self.compiler.name_table = Some(val);
        }
        if let Ok(val) = env::var("DAYTONA_STRICT_RESOLUTION") {
            self.compiler.strict_resolution = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("DAYTONA_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.compiler.name_table {
            if path.trim().is_empty() {
                return Err(crate::error::Error::Config(
                    "name_table path cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Compiler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Path to a canonical-name table CSV; `None` uses the built-in table
    #[serde(default)]
    pub name_table: Option<String>,

    /// Abort compilation on unresolved canonical names
    #[serde(default)]
    pub strict_resolution: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
