//! Rotorwatch CLI entry point.
//!
//! Builds a [`MonitorConfig`] from command-line arguments, runs the
//! fleet monitor to completion, and prints a per-machine summary from
//! the shared history store.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rotorwatch_core::{MonitorConfig, SinkKind};
use rotorwatch_fleet::FleetMonitor;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SinkArg {
    /// CMMS-facing maintenance backend.
    Cmms,
    /// Deterministic local stand-in.
    Local,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Cmms => SinkKind::Cmms,
            SinkArg::Local => SinkKind::Local,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rotorwatch", about = "Vibration-based machine health monitoring")]
struct Args {
    /// Observation cycles to run per machine
    #[arg(long, default_value = "200")]
    cycles: u32,

    /// Pause between cycles in milliseconds
    #[arg(long, default_value = "100")]
    cycle_delay_ms: u64,

    /// Machine ids to monitor (repeatable); defaults to the demo roster
    #[arg(long = "machine", value_name = "ID")]
    machines: Vec<String>,

    /// Machine whose simulated signal degrades over the run
    #[arg(long, value_name = "ID")]
    degrading: Option<String>,

    /// Maintenance ticket backend
    #[arg(long, value_enum, default_value = "cmms")]
    sink: SinkArg,

    /// Observations retained per machine
    #[arg(long, default_value = "500")]
    history_capacity: usize,

    /// Seed for the simulated sensors
    #[arg(long, default_value = "42")]
    seed: u64,
}

impl Args {
    fn into_config(self) -> Result<MonitorConfig, rotorwatch_core::ConfigError> {
        let mut builder = MonitorConfig::builder()
            .cycles_per_run(self.cycles)
            .cycle_delay(Duration::from_millis(self.cycle_delay_ms))
            .sink(self.sink.into())
            .history_capacity(self.history_capacity)
            .rng_seed(self.seed);
        if !self.machines.is_empty() {
            builder = builder.machines(self.machines);
        }
        if let Some(id) = self.degrading {
            builder = builder.degrading_machine(id);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Args::parse().into_config()?;
    let monitor = FleetMonitor::new(config);
    let store = monitor.store();

    monitor.run().await;

    println!("\nMachine summary");
    println!("{:<12} {:>6} {:>10} {:>10} {:>12}", "machine", "obs", "health", "anomaly", "rul");
    for machine_id in store.list_machines() {
        let history = store.get_history(&machine_id);
        match store.latest(&machine_id) {
            Some(latest) => println!(
                "{:<12} {:>6} {:>10.4} {:>10.2} {:>12.1}",
                machine_id.as_str(),
                history.len(),
                latest.health,
                latest.anomaly_score,
                latest.rul,
            ),
            None => println!("{:<12} {:>6} (no observations)", machine_id.as_str(), 0),
        }
    }

    Ok(())
}
