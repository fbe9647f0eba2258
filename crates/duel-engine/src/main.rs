//! # Duel Engine
//!
//! Headless host for the duel simulation.
//!
//! Loads a TOML configuration, runs the match at a fixed timestep with
//! scripted sides playing on their own, logs every effect event and
//! prints the final snapshot as JSON.
//!
//! Usage: `duel [CONFIG_PATH]` (defaults to `duel.toml`).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod runner;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};
use crate::runner::HeadlessRunner;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("duel=info".parse()?))
        .init();

    info!("Duel engine starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let config = EngineConfig::load_from(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let mut runner = HeadlessRunner::new(&config).context("Failed to create duel")?;
    let summary = runner.run();

    match summary.winner {
        Some(winner) => info!("{} wins the match", winner),
        None => info!("No match winner after {} ticks", summary.ticks),
    }
    info!(
        "Simulated {:.1}s (complete: {}), hits landed P1 {} / P2 {}",
        summary.simulated_seconds, summary.finished, summary.hits[0], summary.hits[1]
    );
    println!("{}", summary.snapshot.to_json_pretty()?);

    info!("Duel engine shutdown complete");
    Ok(())
}
