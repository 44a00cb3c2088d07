// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Sensor bank - owns the dashboard sensors for a session

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Sensor, SensorKind, SensorSimulator, SensorSnapshot};

const TEMPERATURE_SEED: [f64; 10] = [22.5, 22.7, 22.4, 22.8, 22.3, 22.6, 22.5, 22.9, 22.4, 22.7];
const HUMIDITY_SEED: [f64; 10] = [65.0, 66.0, 64.0, 67.0, 63.0, 65.0, 66.0, 64.0, 65.0, 67.0];
const LIGHT_SEED: [f64; 10] = [75.0, 76.0, 74.0, 77.0, 73.0, 75.0, 78.0, 74.0, 76.0, 75.0];

/// One simulated reading taken during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub kind: SensorKind,
    pub value: f64,
}

/// The set of sensors shown on the dashboard, kept in evaluation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorBank {
    sensors: Vec<Sensor>,
}

impl SensorBank {
    /// Sensors with the dashboard's seed values and seed history
    pub fn seeded() -> Self {
        Self::from_sensors(vec![
            Sensor::new(SensorKind::Temperature, 22.5, &TEMPERATURE_SEED),
            Sensor::new(SensorKind::Humidity, 65.0, &HUMIDITY_SEED),
            Sensor::new(SensorKind::Light, 75.0, &LIGHT_SEED),
        ])
    }

    /// Build a bank from arbitrary sensors. Later duplicates of a kind are dropped.
    pub fn from_sensors(sensors: Vec<Sensor>) -> Self {
        let mut sensors = sensors;
        sensors.sort_by_key(|s| s.kind);
        sensors.dedup_by_key(|s| s.kind);
        Self { sensors }
    }

    pub fn get(&self, kind: SensorKind) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn snapshot(&self, kind: SensorKind) -> Option<SensorSnapshot> {
        self.get(kind).map(Sensor::snapshot)
    }

    pub fn snapshots(&self) -> Vec<SensorSnapshot> {
        self.sensors.iter().map(Sensor::snapshot).collect()
    }

    /// Step every sensor once, in evaluation order.
    pub fn advance(&mut self, simulator: &mut SensorSimulator) -> Vec<Reading> {
        self.sensors
            .iter_mut()
            .map(|sensor| {
                let value = simulator.tick(sensor);
                debug!("{} -> {}", sensor.kind, value);
                Reading { kind: sensor.kind, value }
            })
            .collect()
    }
}

impl Default for SensorBank {
    fn default() -> Self {
        Self::seeded()
    }
}
