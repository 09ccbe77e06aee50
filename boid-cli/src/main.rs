use anyhow::{Context, Result};
use boid_cli::{apply_overrides, load_config, run, write_snapshot, Args};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Boid simulation starting...");

    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    log::info!(
        "Boids: {}, layout: {:?}, seed: {:?}",
        config.spawn.count,
        config.spawn.layout,
        config.seed
    );
    log::info!("Frames: {} at dt {:.4}s", args.frames, args.dt);
    log::debug!("Settings: {:?}", config.settings);

    let report = run(config, args.frames, args.dt, args.report_every).context("Simulation error")?;

    log::info!(
        "Finished after {} frames, mean speed {:.2}, {:.0}% inside boundary",
        report.stats.frame,
        report.stats.mean_speed,
        report.stats.inside_fraction * 100.0
    );

    if let Some(path) = args.snapshot.as_deref() {
        write_snapshot(path, &report)?;
    }

    Ok(())
}
