// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Monitor - the owned dashboard state and its tick handler

use std::sync::Arc;
use chrono::Utc;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::event_bus::{EventBus, TickReport};
use super::scheduler::{SchedulerState, SimulationScheduler};
use super::{on_off, Actuators, DashboardSnapshot, SettingsForm};
use crate::config::{parse_interval, validate_interval, Config};
use crate::detection::{ThresholdEvaluator, ThresholdForm, Thresholds};
use crate::error::{MonitorError, Result};
use crate::events::{EventFilter, EventLog, EventLogEntry, EventType};
use crate::sensors::{SensorBank, SensorKind, SensorSimulator, SensorSnapshot};

struct MonitorState {
    sensors: SensorBank,
    simulator: SensorSimulator,
    thresholds: Thresholds,
    log: EventLog,
    actuators: Actuators,
    notifications: bool,
    refresh_interval_secs: u64,
    ticks: u64,
    bus: Arc<EventBus>,
}

impl MonitorState {
    fn record(
        &mut self,
        event_type: EventType,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> EventLogEntry {
        let entry = self.log.append(event_type, description, value);
        self.bus.publish_entry(entry.clone());
        entry
    }

    fn run_tick(&mut self) -> TickReport {
        let readings = self.sensors.advance(&mut self.simulator);
        let alerts = ThresholdEvaluator::evaluate(&self.sensors, &self.thresholds);

        for alert in &alerts {
            debug!("{}: {}", alert.description, alert.value);
            self.record(EventType::Sensor, alert.description.clone(), alert.value.clone());
        }
        self.ticks += 1;

        let report = TickReport {
            sequence: self.bus.next_sequence(),
            at: Utc::now(),
            readings,
            alerts,
        };
        self.bus.publish_tick(report.clone());
        report
    }
}

/// Scheduler callback. The token is re-checked under the state lock so a tick
/// racing `stop` leaves state untouched.
fn tick_handler(state: Arc<Mutex<MonitorState>>) -> impl FnMut(&CancellationToken) + Send + 'static {
    move |token: &CancellationToken| {
        let mut state = state.lock();
        if token.is_cancelled() {
            return;
        }
        state.run_tick();
    }
}

/// Dashboard core: sensors, thresholds, event log, settings and the scheduler.
///
/// Views only ever receive cloned snapshots. All mutation goes through this
/// type and is serialised by one state lock, which a tick holds for its
/// whole update.
pub struct Monitor {
    state: Arc<Mutex<MonitorState>>,
    scheduler: Mutex<SimulationScheduler>,
    bus: Arc<EventBus>,
}

impl Monitor {
    pub fn new(config: &Config) -> Self {
        let bus = Arc::new(EventBus::default());
        let simulator = match config.simulation.seed {
            Some(seed) => SensorSimulator::seeded(seed),
            None => SensorSimulator::new(),
        };

        let mut state = MonitorState {
            sensors: SensorBank::seeded(),
            simulator,
            thresholds: config.thresholds,
            log: EventLog::new(),
            actuators: config.actuators,
            notifications: config.notifications,
            refresh_interval_secs: config.simulation.refresh_interval_secs,
            ticks: 0,
            bus: Arc::clone(&bus),
        };
        state.record(EventType::Sensor, "System started", "Status: OK");

        Self {
            state: Arc::new(Mutex::new(state)),
            scheduler: Mutex::new(SimulationScheduler::new()),
            bus,
        }
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    // Scheduler lifecycle

    /// Start (or restart) periodic ticks every `interval_secs`.
    ///
    /// An invalid interval is rejected before a running timer is touched.
    pub fn start(&self, interval_secs: u64) -> Result<()> {
        self.scheduler
            .lock()
            .start(interval_secs, tick_handler(Arc::clone(&self.state)))
    }

    /// Start at the configured refresh interval
    pub fn start_configured(&self) -> Result<()> {
        let secs = self.refresh_interval();
        self.start(secs)
    }

    /// Stop ticking. No tick mutates state after this returns.
    pub fn stop(&self) {
        let mut scheduler = self.scheduler.lock();
        if scheduler.stop() {
            drop(self.state.lock());
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.lock().is_running()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.lock().state()
    }

    /// Run one tick immediately: simulate every sensor, evaluate thresholds
    /// and log alerts. This is what the scheduler runs on each period.
    pub fn tick(&self) -> TickReport {
        self.state.lock().run_tick()
    }

    pub fn ticks(&self) -> u64 {
        self.state.lock().ticks
    }

    // Snapshots for views

    pub fn sensor_snapshot(&self, kind: SensorKind) -> Option<SensorSnapshot> {
        self.state.lock().sensors.snapshot(kind)
    }

    /// Look up a sensor by name (`"light"`) or numeric id (`"3"`)
    pub fn sensor_snapshot_by_name(&self, name: &str) -> Result<SensorSnapshot> {
        let kind: SensorKind = name.parse()?;
        self.sensor_snapshot(kind)
            .ok_or_else(|| MonitorError::UnknownSensor(name.to_string()))
    }

    pub fn sensor_snapshots(&self) -> Vec<SensorSnapshot> {
        self.state.lock().sensors.snapshots()
    }

    /// Log entries matching `filter`, newest first
    pub fn event_log(&self, filter: EventFilter) -> Vec<EventLogEntry> {
        self.state.lock().log.filter(filter)
    }

    pub fn thresholds(&self) -> Thresholds {
        self.state.lock().thresholds
    }

    pub fn actuators(&self) -> Actuators {
        self.state.lock().actuators
    }

    pub fn notifications(&self) -> bool {
        self.state.lock().notifications
    }

    pub fn refresh_interval(&self) -> u64 {
        self.state.lock().refresh_interval_secs
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        let running = self.is_running();
        let state = self.state.lock();
        DashboardSnapshot {
            running,
            ticks: state.ticks,
            refresh_interval_secs: state.refresh_interval_secs,
            notifications: state.notifications,
            sensors: state.sensors.snapshots(),
            thresholds: state.thresholds,
            actuators: state.actuators,
            events: state.log.entries(),
        }
    }

    // Configuration from views

    /// Replace thresholds. Non-finite bounds are rejected and the old
    /// thresholds kept.
    pub fn set_thresholds(&self, thresholds: Thresholds) -> bool {
        match thresholds.validate() {
            Ok(()) => {
                self.state.lock().thresholds = thresholds;
                true
            }
            Err(e) => {
                warn!("Rejected thresholds: {}", e);
                false
            }
        }
    }

    /// Parse and apply thresholds typed into the settings form
    pub fn apply_threshold_form(&self, form: &ThresholdForm) -> bool {
        match form.parse() {
            Ok(thresholds) => self.set_thresholds(thresholds),
            Err(e) => {
                warn!("Rejected thresholds: {}", e);
                false
            }
        }
    }

    /// Store a new refresh interval. A running scheduler keeps its old
    /// interval until restarted.
    pub fn set_refresh_interval(&self, secs: u64) -> bool {
        match validate_interval(secs) {
            Ok(secs) => {
                self.state.lock().refresh_interval_secs = secs;
                true
            }
            Err(e) => {
                warn!("Rejected refresh interval: {}", e);
                false
            }
        }
    }

    pub fn set_notifications(&self, enabled: bool) {
        self.state.lock().notifications = enabled;
    }

    pub fn set_actuators(&self, actuators: Actuators) {
        self.state.lock().actuators = actuators;
    }

    /// Record the current actuator positions as a sent command
    pub fn send_actuator_command(&self) -> EventLogEntry {
        let mut state = self.state.lock();
        let summary = state.actuators.summary();
        info!("Actuator command: {}", summary);
        state.record(EventType::Command, "Actuators updated", summary)
    }

    /// Record a user or actuator action
    pub fn append_command_event(
        &self,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> EventLogEntry {
        self.state.lock().record(EventType::Command, description, value)
    }

    /// Apply a settings form as one unit.
    ///
    /// Nothing changes unless thresholds and interval both validate and, when
    /// the scheduler is running, its restart at the new interval succeeds.
    pub fn save_settings(&self, form: &SettingsForm) -> Result<EventLogEntry> {
        let thresholds = form.thresholds.parse()?;
        let interval = parse_interval(&form.refresh_interval)?;

        {
            // Held across restart and write so a concurrent stop cannot interleave.
            let mut scheduler = self.scheduler.lock();
            if scheduler.is_running() {
                scheduler.start(interval, tick_handler(Arc::clone(&self.state)))?;
            }

            let mut state = self.state.lock();
            state.thresholds = thresholds;
            state.notifications = form.notifications;
            state.refresh_interval_secs = interval;
        }

        let value = format!("Interval: {}s, Notifications: {}", interval, on_off(form.notifications));
        Ok(self.append_command_event("Settings updated", value))
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FanMode;
    use crate::sensors::HistoryBuffer;
    use std::time::Duration;
    use tokio::time::sleep;

    fn seeded_config(seed: u64) -> Config {
        let mut config = Config::default();
        config.simulation.seed = Some(seed);
        config
    }

    fn settings_form(interval: &str, light_max: &str) -> SettingsForm {
        let mut thresholds = ThresholdForm::from_thresholds(&Thresholds::default());
        thresholds.light_max = light_max.to_string();
        SettingsForm {
            thresholds,
            notifications: false,
            refresh_interval: interval.to_string(),
        }
    }

    #[test]
    fn test_new_monitor_logs_startup() {
        let monitor = Monitor::new(&Config::default());
        let log = monitor.event_log(EventFilter::All);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, EventType::Sensor);
        assert_eq!(log[0].description, "System started");
        assert!(!monitor.is_running());
        assert_eq!(monitor.scheduler_state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_tick_keeps_values_in_range() {
        let monitor = Monitor::new(&seeded_config(5));
        for _ in 0..500 {
            let report = monitor.tick();
            for reading in &report.readings {
                let (lo, hi) = reading.kind.operating_range();
                assert!((lo..=hi).contains(&reading.value));
            }
        }
        for kind in SensorKind::ALL {
            let snapshot = monitor.sensor_snapshot(kind).unwrap();
            assert_eq!(snapshot.history.len(), HistoryBuffer::CAPACITY);
            assert_eq!(snapshot.history.last(), Some(&snapshot.current_value));
        }
        assert_eq!(monitor.ticks(), 500);
    }

    #[test]
    fn test_tick_logs_alerts_as_sensor_events() {
        let monitor = Monitor::new(&seeded_config(9));
        // every operating value exceeds these ceilings
        assert!(monitor.set_thresholds(Thresholds {
            temp_min: 0.0,
            temp_max: 10.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
            light_max: 50.0,
        }));

        let report = monitor.tick();

        let kinds: Vec<_> = report.alerts.iter().map(|a| a.sensor).collect();
        assert_eq!(kinds, vec![SensorKind::Temperature, SensorKind::Light]);
        let sensor_events = monitor.event_log(EventFilter::Sensor);
        assert_eq!(sensor_events.len(), 3);
        assert_eq!(sensor_events[0].description, "Alert: light exceeds maximum");
        assert_eq!(sensor_events[1].description, "Alert: temperature out of range");
    }

    #[test]
    fn test_sustained_alerts_fill_capped_log() {
        let monitor = Monitor::new(&seeded_config(2));
        monitor.set_thresholds(Thresholds { light_max: 0.0, ..Thresholds::default() });

        for _ in 0..30 {
            monitor.tick();
        }

        let log = monitor.event_log(EventFilter::All);
        assert_eq!(log.len(), EventLog::CAPACITY);
        assert!(log.iter().all(|e| e.description == "Alert: light exceeds maximum"));
    }

    #[test]
    fn test_invalid_thresholds_keep_previous() {
        let monitor = Monitor::new(&Config::default());
        let before = monitor.thresholds();

        assert!(!monitor.set_thresholds(Thresholds { temp_max: f64::NAN, ..before }));

        let mut form = ThresholdForm::from_thresholds(&before);
        form.humidity_min = "lots".to_string();
        assert!(!monitor.apply_threshold_form(&form));

        assert_eq!(monitor.thresholds(), before);
        assert_eq!(monitor.event_log(EventFilter::All).len(), 1);
    }

    #[test]
    fn test_threshold_form_applies() {
        let monitor = Monitor::new(&Config::default());
        let mut form = ThresholdForm::from_thresholds(&monitor.thresholds());
        form.temp_max = "26".to_string();
        assert!(monitor.apply_threshold_form(&form));
        assert_eq!(monitor.thresholds().temp_max, 26.0);
    }

    #[test]
    fn test_refresh_interval_validation() {
        let monitor = Monitor::new(&Config::default());
        assert!(!monitor.set_refresh_interval(0));
        assert_eq!(monitor.refresh_interval(), 2);
        assert!(monitor.set_refresh_interval(5));
        assert_eq!(monitor.refresh_interval(), 5);
    }

    #[test]
    fn test_actuator_command_is_logged() {
        let monitor = Monitor::new(&Config::default());
        monitor.set_actuators(Actuators {
            motor_on: true,
            light_intensity: 120,
            fan_mode: FanMode::Medium,
        });

        let entry = monitor.send_actuator_command();

        assert_eq!(entry.event_type, EventType::Command);
        assert_eq!(entry.value, "Motor: ON, Light: 120, Fan: Medium");
        let commands = monitor.event_log(EventFilter::Command);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0], entry);
    }

    #[test]
    fn test_snapshot_by_name() {
        let monitor = Monitor::new(&Config::default());
        let light = monitor.sensor_snapshot_by_name("light").unwrap();
        assert_eq!(light.current_value, 75.0);
        assert_eq!(monitor.sensor_snapshot_by_name("1").unwrap().unit, "°C");
        assert!(monitor.sensor_snapshot_by_name("co2").is_err());
    }

    #[test]
    fn test_save_settings_rejects_partial_input() {
        let monitor = Monitor::new(&Config::default());

        assert!(monitor.save_settings(&settings_form("0", "70")).is_err());
        assert!(monitor.save_settings(&settings_form("4", "bright")).is_err());

        assert_eq!(monitor.refresh_interval(), 2);
        assert_eq!(monitor.thresholds(), Thresholds::default());
        assert!(monitor.notifications());
        assert!(monitor.event_log(EventFilter::Command).is_empty());
    }

    #[test]
    fn test_save_settings_when_stopped() {
        let monitor = Monitor::new(&Config::default());

        let entry = monitor.save_settings(&settings_form("4", "70")).unwrap();

        assert_eq!(entry.description, "Settings updated");
        assert_eq!(entry.value, "Interval: 4s, Notifications: OFF");
        assert_eq!(monitor.refresh_interval(), 4);
        assert_eq!(monitor.thresholds().light_max, 70.0);
        assert!(!monitor.notifications());
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_failed_restart_leaves_settings_unapplied() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let monitor = Arc::new(Monitor::new(&Config::default()));
        {
            let _guard = rt.enter();
            monitor.start_configured().unwrap();
        }

        // A view thread with no runtime context saves while the timer runs
        let view = Arc::clone(&monitor);
        let result = std::thread::spawn(move || view.save_settings(&settings_form("5", "70")))
            .join()
            .unwrap();

        assert!(matches!(result, Err(MonitorError::NoRuntime)));
        assert!(monitor.is_running());
        assert_eq!(
            monitor.scheduler_state(),
            SchedulerState::Running {
                interval: Duration::from_secs(2)
            }
        );
        assert_eq!(monitor.refresh_interval(), 2);
        assert_eq!(monitor.thresholds(), Thresholds::default());
        assert!(monitor.notifications());
        assert!(monitor.event_log(EventFilter::Command).is_empty());

        monitor.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_drives_ticks() {
        let monitor = Monitor::new(&seeded_config(1));
        monitor.start_configured().unwrap();

        sleep(Duration::from_millis(6_500)).await;

        assert_eq!(monitor.ticks(), 3);
        monitor.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop() {
        let monitor = Monitor::new(&seeded_config(1));
        let mut ticks = monitor.event_bus().subscribe_ticks();
        monitor.start(1).unwrap();

        let first = ticks.recv().await.unwrap();
        assert_eq!(first.sequence, 1);

        monitor.stop();
        let snapshot = monitor.sensor_snapshots();
        let count = monitor.ticks();

        sleep(Duration::from_secs(30)).await;

        assert_eq!(monitor.ticks(), count);
        assert_eq!(monitor.sensor_snapshots(), snapshot);
        assert!(ticks.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_restart_keeps_running_timer() {
        let monitor = Monitor::new(&seeded_config(1));
        monitor.start(1).unwrap();

        assert!(matches!(
            monitor.start(0),
            Err(MonitorError::InvalidConfiguration { .. })
        ));

        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(monitor.ticks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_one_timer() {
        let monitor = Monitor::new(&seeded_config(1));
        monitor.start(5).unwrap();
        monitor.start(1).unwrap();

        sleep(Duration::from_millis(5_500)).await;

        assert_eq!(monitor.ticks(), 5);
        assert_eq!(
            monitor.scheduler_state(),
            SchedulerState::Running {
                interval: Duration::from_secs(1)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_settings_restarts_running_scheduler() {
        let monitor = Monitor::new(&seeded_config(1));
        monitor.start_configured().unwrap();

        monitor.save_settings(&settings_form("5", "90")).unwrap();
        assert_eq!(
            monitor.scheduler_state(),
            SchedulerState::Running {
                interval: Duration::from_secs(5)
            }
        );

        sleep(Duration::from_millis(4_500)).await;
        assert_eq!(monitor.ticks(), 0);
        sleep(Duration::from_secs(1)).await;
        assert_eq!(monitor.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_waits_for_restart() {
        let monitor = Monitor::new(&seeded_config(1));
        monitor.start(1).unwrap();
        assert!(monitor.set_refresh_interval(10));

        sleep(Duration::from_millis(3_500)).await;

        assert_eq!(monitor.ticks(), 3);
        assert_eq!(
            monitor.scheduler_state(),
            SchedulerState::Running {
                interval: Duration::from_secs(1)
            }
        );
    }

    #[test]
    fn test_dashboard_snapshot_serializes() {
        let monitor = Monitor::new(&Config::default());
        monitor.append_command_event("User signed in", "User: ana");

        let dashboard = monitor.dashboard();
        assert!(!dashboard.running);
        assert_eq!(dashboard.sensors.len(), 3);
        assert_eq!(dashboard.events.len(), 2);

        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["events"][0]["type"], "command");
        assert_eq!(json["sensors"][0]["kind"], "temperature");
    }
}
