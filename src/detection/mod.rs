//! Detection module - threshold alerts over the current readings

mod thresholds;

pub use thresholds::{ThresholdForm, Thresholds};

use serde::{Deserialize, Serialize};

use crate::sensors::{SensorBank, SensorKind};

/// A threshold violation, handed straight to the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDescriptor {
    pub sensor: SensorKind,
    pub description: String,
    /// Value with unit, e.g. `31°C`
    pub value: String,
}

/// Compares current readings against thresholds.
///
/// Stateless: a condition that stays out of range raises one alert per tick.
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    /// Alerts for every sensor in the bank, ordered temperature, humidity, light.
    pub fn evaluate(sensors: &SensorBank, thresholds: &Thresholds) -> Vec<AlertDescriptor> {
        SensorKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let sensor = sensors.get(kind)?;
                Self::check(kind, sensor.current_value(), thresholds)
            })
            .collect()
    }

    /// Check a single value.
    ///
    /// Light is checked against its ceiling only; low light never alerts.
    pub fn check(kind: SensorKind, value: f64, thresholds: &Thresholds) -> Option<AlertDescriptor> {
        let (violated, description) = match kind {
            SensorKind::Temperature => (
                value < thresholds.temp_min || value > thresholds.temp_max,
                "Alert: temperature out of range",
            ),
            SensorKind::Humidity => (
                value < thresholds.humidity_min || value > thresholds.humidity_max,
                "Alert: humidity out of range",
            ),
            SensorKind::Light => (value > thresholds.light_max, "Alert: light exceeds maximum"),
        };

        violated.then(|| AlertDescriptor {
            sensor: kind,
            description: description.to_string(),
            value: kind.format_value(value),
        })
    }
}
