// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::Actuators;
use crate::detection::Thresholds;
use crate::error::MonitorError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive (`info`, `envdash=debug`, ...)
    pub log_level: String,

    /// Show alert notifications in views
    pub notifications: bool,

    /// Simulation settings
    pub simulation: SimulationConfig,

    /// Alert thresholds
    pub thresholds: Thresholds,

    /// Initial actuator positions
    pub actuators: Actuators,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notifications: true,
            simulation: SimulationConfig::default(),
            thresholds: Thresholds::default(),
            actuators: Actuators::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Reject settings the monitor would refuse at runtime
    pub fn validate(&self) -> std::result::Result<(), MonitorError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| MonitorError::invalid("log_level", e.to_string()))?;
        self.simulation.validate()?;
        self.thresholds.validate()
    }

    /// Filter directive for the log subscriber. `--trace` and `--debug`
    /// override the configured level.
    pub fn log_directive(&self, debug: bool, trace: bool) -> &str {
        if trace {
            "trace"
        } else if debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("envdash"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds between ticks, must be positive
    pub refresh_interval_secs: u64,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn validate(&self) -> std::result::Result<(), MonitorError> {
        validate_interval(self.refresh_interval_secs).map(|_| ())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 2,
            seed: None,
        }
    }
}

pub(crate) fn validate_interval(secs: u64) -> std::result::Result<u64, MonitorError> {
    if secs == 0 {
        return Err(MonitorError::invalid(
            "refresh_interval_secs",
            "interval must be a positive number of seconds",
        ));
    }
    Ok(secs)
}

/// Parse a refresh interval typed by the user
pub fn parse_interval(raw: &str) -> std::result::Result<u64, MonitorError> {
    let secs = raw.trim().parse::<u64>().map_err(|_| {
        MonitorError::invalid("refresh_interval_secs", format!("`{raw}` is not a positive integer"))
    })?;
    validate_interval(secs)
}
