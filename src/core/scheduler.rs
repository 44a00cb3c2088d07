// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Periodic tick scheduler

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::validate_interval;
use crate::error::{MonitorError, Result};

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running { interval: Duration },
}

struct ActiveTimer {
    interval: Duration,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives one recurring tick on the Tokio runtime.
///
/// At most one timer is active. Starting while running replaces the timer.
/// The tick callback receives the timer's cancellation token so it can
/// re-check it under whatever lock guards the state it mutates.
pub struct SimulationScheduler {
    active: Option<ActiveTimer>,
}

impl SimulationScheduler {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn state(&self) -> SchedulerState {
        match &self.active {
            Some(timer) => SchedulerState::Running {
                interval: timer.interval,
            },
            None => SchedulerState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start ticking every `interval_secs`, cancelling any existing timer.
    ///
    /// The first tick fires one full interval after this call. Must be
    /// called from within a Tokio runtime.
    pub fn start<F>(&mut self, interval_secs: u64, tick: F) -> Result<()>
    where
        F: FnMut(&CancellationToken) + Send + 'static,
    {
        let secs = validate_interval(interval_secs)?;
        let runtime = Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;

        self.stop();

        let interval = Duration::from_secs(secs);
        let token = CancellationToken::new();
        let handle = runtime.spawn(run_timer(interval, token.clone(), tick));

        self.active = Some(ActiveTimer {
            interval,
            token,
            handle,
        });
        info!("Scheduler started, ticking every {}s", secs);
        Ok(())
    }

    /// Cancel the timer. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(timer) => {
                timer.token.cancel();
                timer.handle.abort();
                info!("Scheduler stopped");
                true
            }
            None => false,
        }
    }
}

impl Default for SimulationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer<F>(period: Duration, token: CancellationToken, mut tick: F)
where
    F: FnMut(&CancellationToken) + Send + 'static,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => tick(&token),
        }
    }
    debug!("Timer task for {:?} exited", period);
}
