#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line driver for the medieval RPG simulation.
//!
//! Loads a start map from a directory of TOML map documents, replays an
//! optional input script for a fixed number of ticks and prints a summary.
//! Every frame is turned into a drawable scene so presentation stays honest
//! even without a window.

mod maps;
mod script;
mod session;
mod settings;

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glam::Vec2;
use medieval_rpg_rendering::{RenderingBackend, Scene};
use medieval_rpg_system_simulation::Simulation;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    maps::TomlMaps,
    script::Playback,
    session::{HeadlessBackend, LoggedAudio, Summary, Tally},
    settings::Settings,
};

/// Runs the medieval RPG simulation without a window.
#[derive(Debug, Parser)]
#[command(name = "medieval-rpg", version, about, long_about = None)]
struct Cli {
    /// Settings file; flags given on the command line take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding the TOML map documents.
    #[arg(long, value_name = "DIR")]
    maps: Option<PathBuf>,
    /// Start map, either a name under the maps directory or a file path.
    #[arg(long, value_name = "MAP")]
    start: Option<String>,
    /// Number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u64>,
    /// Input script replayed frame by frame.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
    /// Seed for every random generator of the session.
    #[arg(long)]
    seed: Option<u64>,
    /// Writes the final frame snapshot as JSON to this file.
    #[arg(long, value_name = "FILE")]
    dump_snapshot: Option<PathBuf>,
    /// Log filter, overriding `RUST_LOG` and the settings file.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(maps) = &self.maps {
            settings.maps = maps.clone();
        }
        if let Some(start) = &self.start {
            settings.start = start.clone();
        }
        if let Some(ticks) = self.ticks {
            settings.ticks = ticks;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    init_logging(cli.log_level.is_some(), &settings.log_level)?;
    run(&cli, &settings)
}

fn init_logging(explicit: bool, level: &str) -> Result<()> {
    let filter = if explicit {
        EnvFilter::try_new(level)?
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(level)?,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let provider = TomlMaps::new(&settings.maps);
    let start = provider.locate(&settings.start);
    let mut playback = match &cli.script {
        Some(path) => Playback::load(path)?,
        None => Playback::default(),
    };
    let viewport = Vec2::from(settings.viewport);

    let mut simulation = Simulation::new(settings.simulation_config(), provider, LoggedAudio);
    let mut events = Vec::new();
    simulation
        .start(&start, &mut events)
        .with_context(|| format!("failed to start on map {}", settings.start))?;
    info!(map = %start, seed = settings.seed, ticks = settings.ticks, "session started");

    let mut tally = Tally::default();
    let mut backend = HeadlessBackend::default();
    tally.record(&events);
    for tick in 0..settings.ticks {
        events.clear();
        let input = playback.input_at(tick);
        simulation.step(&input, &mut events);
        for event in &events {
            debug!(tick, ?event, "event");
        }
        tally.record(&events);

        let snapshot = simulation.snapshot();
        backend.present(&Scene::from_snapshot(&snapshot, viewport))?;
        if snapshot.player.state.is_dead() {
            info!(tick, "player died, ending session");
            break;
        }
    }

    let snapshot = simulation.snapshot();
    if let Some(path) = &cli.dump_snapshot {
        let json = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialise the final snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    }

    println!(
        "{}",
        Summary {
            snapshot: &snapshot,
            tally,
            backend,
        }
    );
    Ok(())
}
