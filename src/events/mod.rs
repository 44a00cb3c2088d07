//! Event log module - alert and command history shown on the history screen

mod log;

pub use log::{EventFilter, EventLog, EventLogEntry, EventType};

use chrono::{DateTime, Local, Utc};

/// Relative age of an entry as shown in the history list.
///
/// Under a minute is "just now", under an hour "`N`m ago", under a day
/// "`N`h ago" (both floored). Older entries get an absolute local
/// `dd/mm HH:MM` stamp.
pub fn format_age(entry: &EventLogEntry, now: DateTime<Utc>) -> String {
    let secs = (now - entry.timestamp).num_seconds();

    if secs < 60 {
        "just now".to_string()
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        entry
            .timestamp
            .with_timezone(&Local)
            .format("%d/%m %H:%M")
            .to_string()
    }
}
