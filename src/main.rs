// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! envdash - headless runner for the monitoring dashboard core
//!
//! Signs a session in, logs every tick and alert, and on shutdown prints
//! the final dashboard snapshot.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use envdash::{format_age, Config, EventFilter, Monitor, Session, VERSION};

/// envdash - simulated environmental monitoring dashboard
#[derive(Parser, Debug)]
#[command(name = "envdash")]
#[command(version = VERSION)]
#[command(about = "Simulated environmental monitoring with threshold alerts")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between ticks (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks instead of waiting for Ctrl+C
    #[arg(long)]
    ticks: Option<u64>,

    /// Name recorded for the session
    #[arg(short, long, default_value = "operator")]
    user: String,

    /// Event log filter for the final summary (all, sensor, command)
    #[arg(long, default_value = "all")]
    filter: EventFilter,

    /// Print the final dashboard snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(interval) = args.interval {
        config.simulation.refresh_interval_secs = interval;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.validate()?;

    let filter = EnvFilter::try_new(config.log_directive(args.debug, args.trace))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("envdash v{}", VERSION);
    info!("Configuration loaded from {:?}", config_path);
    info!("Refresh interval: {}s", config.simulation.refresh_interval_secs);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config, args))
}

async fn run(config: Config, args: Args) -> Result<()> {
    let monitor = Arc::new(Monitor::new(&config));
    let mut ticks = monitor.event_bus().subscribe_ticks();
    let mut session = Session::new(Arc::clone(&monitor));

    session.sign_in(&args.user)?;
    info!("Monitoring started, press Ctrl+C to stop");

    loop {
        tokio::select! {
            report = ticks.recv() => match report {
                Ok(report) => {
                    let values: Vec<String> = report
                        .readings
                        .iter()
                        .map(|r| format!("{}={}", r.kind, r.kind.format_value(r.value)))
                        .collect();
                    info!("tick #{} {}", report.sequence, values.join(" "));
                    for alert in &report.alerts {
                        warn!("{} ({})", alert.description, alert.value);
                    }
                    if args.ticks.is_some_and(|limit| report.sequence >= limit) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!("Skipped {} tick reports", skipped),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    session.sign_out();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&monitor.dashboard())?);
    } else {
        let now = chrono::Utc::now();
        for entry in monitor.event_log(args.filter) {
            info!(
                "[{}] {} {} {}",
                entry.event_type,
                format_age(&entry, now),
                entry.description,
                entry.value
            );
        }
    }

    info!("envdash shutdown complete");
    Ok(())
}
