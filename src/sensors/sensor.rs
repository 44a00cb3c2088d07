// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Sensor types and read-only snapshots

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::HistoryBuffer;
use crate::error::MonitorError;

/// Sensor kinds on the dashboard, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Light,
}

impl SensorKind {
    /// All kinds in the order ticks simulate and evaluate them
    pub const ALL: [SensorKind; 3] = [Self::Temperature, Self::Humidity, Self::Light];

    /// Stable numeric id shown to views
    pub fn id(self) -> u32 {
        match self {
            Self::Temperature => 1,
            Self::Humidity => 2,
            Self::Light => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Light => "Light",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity | Self::Light => "%",
        }
    }

    /// Display range used for gauges
    pub fn display_range(self) -> (f64, f64) {
        match self {
            Self::Temperature => (0.0, 50.0),
            Self::Humidity | Self::Light => (0.0, 100.0),
        }
    }

    /// Range the simulated value is clamped to after every step
    pub fn operating_range(self) -> (f64, f64) {
        match self {
            Self::Temperature => (20.0, 25.0),
            Self::Humidity => (60.0, 70.0),
            Self::Light => (70.0, 80.0),
        }
    }

    /// Peak-to-peak amplitude of the per-tick random variation
    pub fn noise_amplitude(self) -> f64 {
        match self {
            Self::Temperature => 2.0,
            Self::Humidity => 3.0,
            Self::Light => 5.0,
        }
    }

    /// Number of decimal places kept after each step
    pub fn decimals(self) -> u32 {
        match self {
            Self::Temperature => 1,
            Self::Humidity | Self::Light => 0,
        }
    }

    /// Value formatted with its unit, e.g. `22.5°C`
    pub fn format_value(self, value: f64) -> String {
        format!("{}{}", value, self.unit())
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
        };
        f.write_str(key)
    }
}

impl FromStr for SensorKind {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(id) = key.parse::<u32>() {
            return Self::from_id(id).ok_or_else(|| MonitorError::UnknownSensor(s.to_string()));
        }
        match key.as_str() {
            "temperature" | "temp" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "light" => Ok(Self::Light),
            _ => Err(MonitorError::UnknownSensor(s.to_string())),
        }
    }
}

/// A simulated sensor and its rolling history.
///
/// `current_value` only changes through [`SensorSimulator::tick`](super::SensorSimulator::tick).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u32,
    pub kind: SensorKind,
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub(crate) current_value: f64,
    pub(crate) history: HistoryBuffer,
}

impl Sensor {
    /// Build a sensor. The seed value is clamped to the operating range.
    pub fn new(kind: SensorKind, seed_value: f64, seed_history: &[f64]) -> Self {
        let (lo, hi) = kind.operating_range();
        let (min, max) = kind.display_range();
        Self {
            id: kind.id(),
            kind,
            name: kind.name().to_string(),
            unit: kind.unit().to_string(),
            min,
            max,
            current_value: seed_value.clamp(lo, hi),
            history: HistoryBuffer::from_values(seed_history.iter().copied()),
        }
    }

    /// Sensor holding an arbitrary value, for exercising alerts and clamping.
    #[cfg(test)]
    pub(crate) fn with_value(kind: SensorKind, value: f64) -> Self {
        let mut sensor = Self::new(kind, value, &[]);
        sensor.current_value = value;
        sensor
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            kind: self.kind,
            current_value: self.current_value,
            unit: self.unit.clone(),
            history: self.history.snapshot(),
        }
    }
}

/// Read-only copy of a sensor handed to views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub kind: SensorKind,
    pub current_value: f64,
    pub unit: String,
    /// Oldest first
    pub history: Vec<f64>,
}
