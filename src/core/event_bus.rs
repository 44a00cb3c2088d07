// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Event bus notifying views of completed ticks and new log entries

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::detection::AlertDescriptor;
use crate::events::EventLogEntry;
use crate::sensors::Reading;

/// Outcome of one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub sequence: u64,
    pub at: DateTime<Utc>,
    pub readings: Vec<Reading>,
    pub alerts: Vec<AlertDescriptor>,
}

/// Broadcast fan-out to views.
///
/// Publishing never blocks and never fails; with no subscribers the
/// message is dropped.
pub struct EventBus {
    tick_tx: broadcast::Sender<TickReport>,
    entry_tx: broadcast::Sender<EventLogEntry>,
    tick_counter: AtomicU64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tick_tx, _) = broadcast::channel(capacity);
        let (entry_tx, _) = broadcast::channel(capacity);

        Self {
            tick_tx,
            entry_tx,
            tick_counter: AtomicU64::new(0),
        }
    }

    /// Sequence number for the next tick, starting at 1
    pub fn next_sequence(&self) -> u64 {
        self.tick_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn publish_tick(&self, report: TickReport) {
        let _ = self.tick_tx.send(report);
    }

    pub fn publish_entry(&self, entry: EventLogEntry) {
        let _ = self.entry_tx.send(entry);
    }

    pub fn subscribe_ticks(&self) -> broadcast::Receiver<TickReport> {
        self.tick_tx.subscribe()
    }

    pub fn subscribe_entries(&self) -> broadcast::Receiver<EventLogEntry> {
        self.entry_tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
