// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! envdash - Environmental Monitoring Dashboard Core
//!
//! The state behind a simulated environmental-monitoring dashboard:
//! - Bounded random-walk simulation of temperature, humidity and light
//! - Ten-reading rolling history per sensor for live charts
//! - Threshold alerts (light has a ceiling only)
//! - Capped, filterable event log of alerts and user commands
//! - Cancellable periodic scheduler tied to the sign-in session
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Monitor                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  Session ──start/stop──► SimulationScheduler             │
//! │                               │ tick                     │
//! │                               ▼                          │
//! │  ┌────────────┐   ┌───────────────────┐   ┌──────────┐   │
//! │  │ SensorBank │ → │ ThresholdEvaluator│ → │ EventLog │   │
//! │  │ + History  │   └───────────────────┘   └──────────┘   │
//! │  └────────────┘                                │         │
//! │        ↓                                       ↓         │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │                    Event Bus                      │   │
//! │  └──────────────────────────────────────────────────┘    │
//! │                        ↓ snapshots                       │
//! │                      Views (external)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod events;
pub mod sensors;

// Re-exports for convenience
pub use crate::config::{Config, SimulationConfig};
pub use crate::core::{Actuators, DashboardSnapshot, EventBus, FanMode, Monitor, Session, SettingsForm, TickReport};
pub use crate::detection::{AlertDescriptor, ThresholdEvaluator, ThresholdForm, Thresholds};
pub use crate::error::{MonitorError, Result};
pub use crate::events::{format_age, EventFilter, EventLog, EventLogEntry, EventType};
pub use crate::sensors::{HistoryBuffer, SensorKind, SensorSimulator, SensorSnapshot};

/// envdash version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// envdash name
pub const NAME: &str = "envdash";
