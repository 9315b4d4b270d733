//! tickles CLI - drive the battery-guarded robot from the command line.
//!
//! - `tickles simulate` - run the closed-loop simulation and print each tick
//! - `tickles config` - print the effective configuration as YAML

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tickles_robot::{RobotConfig, Simulation, SimulationStep};

#[derive(Parser)]
#[command(name = "tickles")]
#[command(about = "Reactive behavior tree robot simulator", version)]
struct Cli {
    /// Robot configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation
    Simulate {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 50)]
        ticks: u64,

        /// Starting position
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        position: i32,

        /// Starting battery charge (1.0 is full)
        #[arg(long, default_value_t = 1.0)]
        charge: f64,

        /// Emit one JSON object per tick
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            ticks,
            position,
            charge,
            json,
        } => simulate(config, ticks, position, charge, json),
        Commands::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RobotConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading config");
            RobotConfig::load(path)
        }
        None => Ok(RobotConfig::default()),
    }
}

fn simulate(config: RobotConfig, ticks: u64, position: i32, charge: f64, json: bool) -> Result<()> {
    tracing::info!(ticks, position, charge, "Starting simulation");

    let mut sim = Simulation::new(config, position, charge)
        .context("initial tick did not converge")?;

    if !json {
        println!("{:>6} {:>8} {:>7} {:>8} {:>8} {:>6}", "tick", "position", "charge", "velocity", "charging", "passes");
    }

    for _ in 0..ticks {
        let step = sim.step().context("simulation stopped")?;
        if json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            print_step(&step);
        }
    }

    tracing::info!(
        position = sim.robot().position().position,
        charging = sim.robot().is_charging(),
        "Simulation finished"
    );
    Ok(())
}

fn print_step(step: &SimulationStep) {
    println!(
        "{:>6} {:>8} {:>7.3} {:>8} {:>8} {:>6}",
        step.tick, step.position, step.charge, step.velocity, step.charging, step.passes
    );
}
