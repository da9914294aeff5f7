// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/sensorhub-rs

//! SensorHub - a multiplexing sensor event hub
//!
//! The binary wires a sensor device to the hub, runs the polling loop and,
//! in demo mode, attaches a subscriber connection that logs what it
//! receives. Real deployments embed the library behind their own transport.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sensorhub::{Config, SensorHub, SimulatedDevice, VERSION};

/// SensorHub - a multiplexing sensor event hub
#[derive(Parser, Debug)]
#[command(name = "sensorhub")]
#[command(author = "SensorHub Project")]
#[command(version = VERSION)]
#[command(about = "Multiplexes sensor event streams to many subscribers")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Demo mode with a simulated sensor device
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("SensorHub v{}", VERSION);

    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;
    if args.demo {
        config.demo_mode = true;
    }
    info!("Configuration loaded from {:?}", config_path);
    info!("Demo mode: {}", config.demo_mode);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    if !config.demo_mode {
        anyhow::bail!("no hardware device layer configured; run with --demo");
    }

    let device = Arc::new(SimulatedDevice::new());
    let hub = SensorHub::new(config.hub.clone(), device);

    for sensor in hub.list_sensors() {
        info!(
            "sensor: {} ({:?}, handle=0x{:08x})",
            sensor.name, sensor.sensor_type, sensor.handle
        );
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let poller = {
        let hub = hub.clone();
        tokio::spawn(async move { hub.run(shutdown_rx).await })
    };

    // Demo subscriber: everything the hub offers, logged as it arrives
    let connection = hub.create_connection();
    let mut rx = connection
        .take_receiver()
        .context("delivery channel already taken")?;
    for sensor in hub.list_sensors() {
        hub.enable(&connection, sensor.handle)?;
    }

    let drain = tokio::spawn(async move {
        let mut total = 0u64;
        while let Some(batch) = rx.recv().await {
            total += batch.len() as u64;
            if total % 100 < batch.len() as u64 {
                info!("received {total} events so far, latest: {:?}", batch[0]);
            }
        }
        info!("delivery channel closed after {total} events");
    });

    info!("SensorHub running; press Ctrl+C to shut down");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, cleaning up...");

    connection.close();
    let _ = shutdown_tx.send(());
    poller.await??;
    drop(connection);
    drain.await?;

    info!("SensorHub shutdown complete");
    Ok(())
}
