// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Alert thresholds and their validation

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Alert bounds for the dashboard sensors.
///
/// Min and max are not required to be ordered. Light only has a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub light_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temp_min: 15.0,
            temp_max: 30.0,
            humidity_min: 40.0,
            humidity_max: 80.0,
            light_max: 90.0,
        }
    }
}

impl Thresholds {
    /// Reject NaN and infinite bounds
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("temp_min", self.temp_min),
            ("temp_max", self.temp_max),
            ("humidity_min", self.humidity_min),
            ("humidity_max", self.humidity_max),
            ("light_max", self.light_max),
        ];
        for (field, value) in bounds {
            if !value.is_finite() {
                return Err(MonitorError::invalid(field, format!("{value} is not a finite number")));
            }
        }
        Ok(())
    }
}

/// Raw threshold fields as typed into the settings form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdForm {
    pub temp_min: String,
    pub temp_max: String,
    pub humidity_min: String,
    pub humidity_max: String,
    pub light_max: String,
}

impl ThresholdForm {
    /// Prefill the form from current thresholds
    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            temp_min: thresholds.temp_min.to_string(),
            temp_max: thresholds.temp_max.to_string(),
            humidity_min: thresholds.humidity_min.to_string(),
            humidity_max: thresholds.humidity_max.to_string(),
            light_max: thresholds.light_max.to_string(),
        }
    }

    /// Parse every field; the first bad field fails the whole form.
    pub fn parse(&self) -> Result<Thresholds> {
        let thresholds = Thresholds {
            temp_min: parse_bound("temp_min", &self.temp_min)?,
            temp_max: parse_bound("temp_max", &self.temp_max)?,
            humidity_min: parse_bound("humidity_min", &self.humidity_min)?,
            humidity_max: parse_bound("humidity_max", &self.humidity_max)?,
            light_max: parse_bound("light_max", &self.light_max)?,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }
}

fn parse_bound(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MonitorError::invalid(field, format!("`{raw}` is not a number")))
}
