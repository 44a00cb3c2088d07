// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Session lifecycle - signing in starts the simulation, signing out stops it

use std::sync::Arc;
use tracing::info;

use super::Monitor;
use crate::error::Result;

/// Sign-in state of the dashboard.
///
/// There is no credential check; a session only bounds the period in which
/// the scheduler runs.
pub struct Session {
    monitor: Arc<Monitor>,
    user: Option<String>,
}

impl Session {
    pub fn new(monitor: Arc<Monitor>) -> Self {
        Self {
            monitor,
            user: None,
        }
    }

    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Start the scheduler at the configured interval and log the sign-in.
    pub fn sign_in(&mut self, user: &str) -> Result<()> {
        self.monitor.start_configured()?;
        self.monitor
            .append_command_event("User signed in", format!("User: {user}"));
        info!("Session opened for {}", user);
        self.user = Some(user.to_string());
        Ok(())
    }

    /// Stop the scheduler and log the sign-out. No-op when signed out.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            self.monitor.stop();
            self.monitor.append_command_event("User signed out", "");
            info!("Session closed for {}", user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::{EventFilter, EventType};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_starts_ticking() {
        let monitor = Arc::new(Monitor::new(&Config::default()));
        let mut session = Session::new(Arc::clone(&monitor));

        session.sign_in("ana@example.com").unwrap();
        assert!(session.is_signed_in());
        assert!(monitor.is_running());

        sleep(Duration::from_millis(4_500)).await;
        assert_eq!(monitor.ticks(), 2);

        let commands = monitor.event_log(EventFilter::Command);
        assert_eq!(commands[0].description, "User signed in");
        assert_eq!(commands[0].value, "User: ana@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_out_stops_ticking() {
        let monitor = Arc::new(Monitor::new(&Config::default()));
        let mut session = Session::new(Arc::clone(&monitor));

        session.sign_in("ana").unwrap();
        sleep(Duration::from_millis(2_500)).await;
        session.sign_out();

        assert!(!session.is_signed_in());
        assert!(!monitor.is_running());
        let ticks = monitor.ticks();
        sleep(Duration::from_secs(20)).await;
        assert_eq!(monitor.ticks(), ticks);

        let latest = &monitor.event_log(EventFilter::All)[0];
        assert_eq!(latest.event_type, EventType::Command);
        assert_eq!(latest.description, "User signed out");
        assert!(latest.value.is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_twice_logs_once() {
        let monitor = Arc::new(Monitor::new(&Config::default()));
        let mut session = Session::new(Arc::clone(&monitor));

        session.sign_in("ana").unwrap();
        session.sign_out();
        session.sign_out();

        let commands = monitor.event_log(EventFilter::Command);
        assert_eq!(commands.len(), 2);
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_sign_in_requires_runtime() {
        let monitor = Arc::new(Monitor::new(&Config::default()));
        let mut session = Session::new(monitor);
        assert!(session.sign_in("ana").is_err());
        assert!(!session.is_signed_in());
    }
}
