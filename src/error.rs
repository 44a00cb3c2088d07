// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Error types for the monitoring core

use thiserror::Error;

/// Errors surfaced by the monitoring core.
///
/// Capacity overflow on history buffers and the event log is never an error;
/// those structures evict silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// Rejected threshold or interval input. The prior value is kept.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration {
        /// Name of the offending setting
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// No sensor matches the given id or name
    #[error("unknown sensor: {0}")]
    UnknownSensor(String),

    /// No event filter matches the given name
    #[error("unknown event filter: {0}")]
    UnknownFilter(String),

    /// The scheduler was started outside a Tokio runtime
    #[error("no Tokio runtime available to drive the scheduler")]
    NoRuntime,
}

impl MonitorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for the monitoring core
pub type Result<T> = std::result::Result<T, MonitorError>;
