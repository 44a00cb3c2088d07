// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Rolling history of recent readings, used directly as chart input

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

/// Fixed-capacity FIFO of the most recent readings of one sensor.
///
/// Values are kept oldest-first. Pushing past [`HistoryBuffer::CAPACITY`]
/// drops the oldest value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBuffer {
    values: VecDeque<f64>,
}

impl HistoryBuffer {
    /// Maximum number of readings kept per sensor
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            values: VecDeque::with_capacity(Self::CAPACITY + 1),
        }
    }

    /// Build a buffer from seed values, keeping only the newest `CAPACITY`.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut buffer = Self::new();
        for value in values {
            buffer.push(value);
        }
        buffer
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > Self::CAPACITY {
            self.values.pop_front();
        }
    }

    /// Contents oldest-first
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
