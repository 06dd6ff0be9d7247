//! Headless entry point for the colony simulation.
//!
//! Loads a configuration document, builds a [`SimulationDriver`], and
//! steps it at a fixed real-time-equivalent rate with no presentation
//! layer attached, printing a final tick summary.

use std::path::PathBuf;

use clap::Parser;
use colonysim_core::{SimulationConfig, SimulationDriver};
use tracing_subscriber::EnvFilter;

/// Run the colony simulation headlessly for a fixed number of ticks.
#[derive(Debug, Parser)]
#[command(name = "colonysim-cli", about = "Headless runner for the colony simulation")]
struct Cli {
    /// Path to the YAML configuration document. Missing sections and
    /// fields fall back to their documented defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run before stopping.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Present for compatibility with a future presentation layer; this
    /// binary never attaches one, so the flag is accepted but has no
    /// effect.
    #[arg(long, default_value_t = true)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let _ = cli.headless;

    let config = match &cli.config {
        Some(path) => colonysim_core::config::load_from_path(path)?,
        None => SimulationConfig::default(),
    };

    tracing::info!(category = "SYSTEM", ticks = cli.ticks, "colonysim-cli starting");

    let mut driver = SimulationDriver::new(config)?;
    let real_dt = 1.0 / f64::from(driver.config().global.tick_rate.max(1));

    let mut summary = None;
    for _ in 0..cli.ticks {
        let tick_summary = driver.step(real_dt)?;
        if tick_summary.entity_count == 0 {
            tracing::info!(category = "SYSTEM", "all entities gone; stopping early");
            summary = Some(tick_summary);
            break;
        }
        summary = Some(tick_summary);
    }

    if let Some(summary) = summary {
        println!(
            "tick={} day={} hour={:.2} season={:?} phase={:?} entities={} jobs={}",
            summary.tick, summary.day, summary.hour, summary.season, summary.day_phase, summary.entity_count, summary.job_count
        );
    }

    Ok(())
}
