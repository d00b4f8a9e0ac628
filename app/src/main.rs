//! Interactive console front-end for the tile map generator.

mod render;
mod session;

use std::io;

use clap::Parser;
use crossterm::{execute, terminal::SetTitle};
use gis_core::{DEFAULT_SCALE, DEFAULT_SIZE, MapConfig};
use tracing_subscriber::EnvFilter;

use crate::session::{Session, time_seed};

/// Seeded tile map generator with carved rivers.
#[derive(Parser)]
#[command(name = "gis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for reproducible maps (defaults to the current time).
    #[arg(short, long)]
    seed: Option<i64>,

    /// Side length of the square map.
    #[arg(long, default_value_t = DEFAULT_SIZE as i64, allow_negative_numbers = true)]
    size: i64,

    /// Number of rivers to carve (defaults to a seed-derived 5-12).
    #[arg(short, long, allow_negative_numbers = true)]
    rivers: Option<i64>,

    /// Noise zoom; larger values give broader terrain features.
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Start in block display mode.
    #[arg(short, long)]
    block: bool,

    /// Log generation details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let seed = cli.seed.unwrap_or_else(time_seed);
    // Bad flags fail here, before any map is built
    let config = match MapConfig::new(cli.size, cli.rivers.unwrap_or(0), cli.scale) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let rivers = cli.rivers.map(|_| config.river_count);

    let mut session = match Session::new(seed, config.size, config.scale, rivers, cli.block) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, SetTitle("GIS Map Maker")) {
        tracing::debug!(error = %e, "could not set terminal title");
    }

    let stdin = io::stdin();
    if let Err(e) = session.run(&mut stdin.lock(), &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
