//! Core module - owned monitor state, periodic scheduler and session lifecycle

mod event_bus;
mod monitor;
mod scheduler;
mod session;

pub use event_bus::{EventBus, TickReport};
pub use monitor::Monitor;
pub use scheduler::{SchedulerState, SimulationScheduler};
pub use session::Session;

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::detection::{ThresholdForm, Thresholds};
use crate::events::EventLogEntry;
use crate::sensors::SensorSnapshot;

/// Fan speed selector on the control screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanMode {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// Actuator positions set from the control screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actuators {
    pub motor_on: bool,
    pub light_intensity: u8,
    pub fan_mode: FanMode,
}

impl Default for Actuators {
    fn default() -> Self {
        Self {
            motor_on: false,
            light_intensity: 180,
            fan_mode: FanMode::Low,
        }
    }
}

impl Actuators {
    /// Value recorded in the log when a command is sent
    pub fn summary(&self) -> String {
        format!(
            "Motor: {}, Light: {}, Fan: {}",
            on_off(self.motor_on),
            self.light_intensity,
            self.fan_mode
        )
    }
}

/// Settings screen submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub thresholds: ThresholdForm,
    pub notifications: bool,
    pub refresh_interval: String,
}

/// Everything a view needs to render the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub running: bool,
    pub ticks: u64,
    pub refresh_interval_secs: u64,
    pub notifications: bool,
    pub sensors: Vec<SensorSnapshot>,
    pub thresholds: Thresholds,
    pub actuators: Actuators,
    /// Newest first
    pub events: Vec<EventLogEntry>,
}

pub(crate) fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
