/*
 * Boid Flocking Simulation
 *
 * Boids follow three local rules: separation, alignment and cohesion.
 * Holding the left mouse button repels nearby boids. Space pauses,
 * A adds a boid and R removes the newest one.
 *
 * Log verbosity follows RUST_LOG (default: info).
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use boids::app;
use boids::SimulationParams;

#[derive(Parser, Debug)]
#[command(author, version, about = "Toroidal boid flocking simulation", long_about = None)]
struct Args {
    /// TOML file with simulation params; omitted keys use the defaults
    params: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let params = match &args.params {
        Some(path) => SimulationParams::from_file(path)
            .with_context(|| format!("loading simulation params from {}", path.display()))?,
        None => SimulationParams::default(),
    };

    info!(boids = params.num_boids, "starting boid simulation");
    app::PARAMS
        .set(params)
        .map_err(|_| anyhow::anyhow!("simulation params were already set"))?;

    nannou::app(app::model).update(app::update).run();

    Ok(())
}
