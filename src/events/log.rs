// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Capped, most-recent-first event log

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Kind of logged event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Sensor-originated, e.g. threshold alerts
    Sensor,
    /// User or actuator action
    Command,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Command => "command",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

impl EventLogEntry {
    /// Relative age label, see [`format_age`](super::format_age)
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        super::format_age(self, now)
    }
}

/// History view filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFilter {
    #[default]
    All,
    Sensor,
    Command,
}

impl EventFilter {
    pub fn matches(self, entry: &EventLogEntry) -> bool {
        match self {
            Self::All => true,
            Self::Sensor => entry.event_type == EventType::Sensor,
            Self::Command => entry.event_type == EventType::Command,
        }
    }
}

impl From<EventType> for EventFilter {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Sensor => Self::Sensor,
            EventType::Command => Self::Command,
        }
    }
}

impl FromStr for EventFilter {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "sensor" => Ok(Self::Sensor),
            "command" => Ok(Self::Command),
            other => Err(MonitorError::UnknownFilter(other.to_string())),
        }
    }
}

/// Capped log, newest entry first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
}

impl EventLog {
    /// Maximum number of retained entries
    pub const CAPACITY: usize = 20;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY + 1),
        }
    }

    /// Record an event stamped with the current time.
    pub fn append(
        &mut self,
        event_type: EventType,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> EventLogEntry {
        self.append_at(event_type, description, value, Utc::now())
    }

    /// Record an event with an explicit timestamp.
    pub fn append_at(
        &mut self,
        event_type: EventType,
        description: impl Into<String>,
        value: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> EventLogEntry {
        let entry = EventLogEntry {
            event_type,
            description: description.into(),
            value: value.into(),
            timestamp,
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(Self::CAPACITY);
        entry
    }

    /// Matching entries, newest first
    pub fn filter(&self, filter: EventFilter) -> Vec<EventLogEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> Vec<EventLogEntry> {
        self.filter(EventFilter::All)
    }

    pub fn latest(&self) -> Option<&EventLogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
