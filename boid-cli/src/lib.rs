//! Headless host for the flocking core: config loading, the frame loop, and reporting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boid_core::FlockSimulation;
use boid_shared::{FlockSnapshot, SimulationConfig, SpawnLayout};
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flocking simulation", long_about = None)]
pub struct Args {
    /// JSON simulation config; missing fields fall back to defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    pub frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Override the number of spawned boids
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Override the spawn layout
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Override the random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log flock statistics every N frames (0 disables)
    #[arg(short, long, default_value_t = 60)]
    pub report_every: u64,

    /// Write the final flock state as JSON to this file
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    Random,
    Grid,
    Formation,
}

impl From<LayoutArg> for SpawnLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Random => SpawnLayout::Random,
            LayoutArg::Grid => SpawnLayout::Grid,
            LayoutArg::Formation => SpawnLayout::Formation,
        }
    }
}

/// Read a JSON config, or use the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    SimulationConfig::from_json_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Layer command-line overrides on top of a loaded config.
pub fn apply_overrides(mut config: SimulationConfig, args: &Args) -> SimulationConfig {
    if let Some(count) = args.count {
        config.spawn.count = count;
    }
    if let Some(layout) = args.layout {
        config.spawn.layout = layout.into();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}

/// Aggregate view of the flock after a frame
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlockStats {
    pub frame: u64,
    pub agents: usize,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Share of boids inside the nominal boundary rectangle.
    pub inside_fraction: f32,
    pub neighbor_pairs: usize,
}

impl FlockStats {
    pub fn collect(flock: &FlockSimulation) -> Self {
        let agents = flock.agents();
        let (mut min_speed, mut max_speed, mut total) = (f32::INFINITY, 0.0f32, 0.0f32);

        for boid in agents {
            let speed = boid.speed();
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);
            total += speed;
        }

        if agents.is_empty() {
            return Self {
                frame: flock.frame(),
                agents: 0,
                mean_speed: 0.0,
                min_speed: 0.0,
                max_speed: 0.0,
                inside_fraction: 1.0,
                neighbor_pairs: 0,
            };
        }

        let count = agents.len() as f32;
        Self {
            frame: flock.frame(),
            agents: agents.len(),
            mean_speed: total / count,
            min_speed,
            max_speed,
            inside_fraction: flock.count_inside() as f32 / count,
            neighbor_pairs: flock.neighbor_pairs().len(),
        }
    }
}

/// Final result of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stats: FlockStats,
    pub snapshot: FlockSnapshot,
}

/// Build a flock from `config` and advance it `frames` times.
pub fn run(config: SimulationConfig, frames: u64, dt: f32, report_every: u64) -> Result<RunReport> {
    let mut flock = FlockSimulation::new(config).context("Failed to initialize flock")?;

    for _ in 0..frames {
        flock.tick(dt);

        if report_every > 0 && flock.frame() % report_every == 0 {
            let stats = FlockStats::collect(&flock);
            log::info!(
                "frame {}: mean speed {:.2} [{:.2}, {:.2}], inside {:.0}%, {} neighbor pairs",
                stats.frame,
                stats.mean_speed,
                stats.min_speed,
                stats.max_speed,
                stats.inside_fraction * 100.0,
                stats.neighbor_pairs
            );
        }
    }

    Ok(RunReport {
        stats: FlockStats::collect(&flock),
        snapshot: flock.snapshot(),
    })
}

pub fn write_snapshot(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Snapshot written to {}", path.display());
    Ok(())
}
