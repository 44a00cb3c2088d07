// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Sensor simulator - bounded random walk per sensor kind

use rand::prelude::*;
use rand::rngs::StdRng;

use super::{Sensor, SensorKind};

/// Produces synthetic readings for the dashboard sensors.
///
/// Each step adds `(r - 0.5) * amplitude` to the current value with `r`
/// uniform on `[0, 1)`, rounds to the kind's precision, then clamps to the
/// kind's operating range.
pub struct SensorSimulator {
    rng: StdRng,
    steps: u64,
}

impl SensorSimulator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible simulator for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng, steps: 0 }
    }

    /// Advance one sensor: update its value and push it onto its history.
    pub fn tick(&mut self, sensor: &mut Sensor) -> f64 {
        let r: f64 = self.rng.gen();
        let value = step(sensor.kind, sensor.current_value, r);
        sensor.current_value = value;
        sensor.history.push(value);
        self.steps += 1;
        value
    }

    /// Total number of sensor steps taken
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// One random-walk step for `kind` given a uniform draw `r` in `[0, 1)`.
pub fn step(kind: SensorKind, current: f64, r: f64) -> f64 {
    let next = current + (r - 0.5) * kind.noise_amplitude();
    let (lo, hi) = kind.operating_range();
    round_to(next, kind.decimals()).clamp(lo, hi)
}

/// Round to `decimals` places by the exact stored value, halves upward.
///
/// 22.45 is stored as 22.4499... and becomes 22.4, while the exact half
/// 22.25 becomes 22.3 and 64.5 becomes 65.
fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        let floor = value.floor();
        return if value - floor >= 0.5 { floor + 1.0 } else { floor };
    }

    let scale = 10f64.powi(decimals as i32);
    // Formatting rounds the exact binary value but breaks exact ties to even.
    let doubled = (value * scale * 2.0).round();
    let exact_tie = doubled % 2.0 != 0.0
        && doubled % 5f64.powi(decimals as i32) == 0.0
        && doubled / (scale * 2.0) == value;
    if exact_tie {
        return ((doubled + doubled.signum()) / 2.0) / scale;
    }

    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}
