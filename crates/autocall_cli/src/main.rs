//! autocall - pricing and calibration of the auto-callable note
//!
//! # Commands
//!
//! - `autocall price --scenario <file.toml>` - price the note at the
//!   scenario's coupon rate
//! - `autocall calibrate --scenario <file.toml>` - solve the scenario's
//!   calibration target and validate the solution
//!
//! Simulation settings in the scenario file can be overridden per run with
//! `--paths`, `--workers`, and `--seed`.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod scenario;

pub use error::{CliError, Result};

use commands::OutputFormat;
use scenario::SimulationOverrides;

/// Auto-callable note pricer and calibrator
#[derive(Parser)]
#[command(name = "autocall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the note at the scenario's coupon rate
    Price {
        /// Path to the TOML scenario file
        #[arg(short, long)]
        scenario: String,

        /// Total Monte Carlo path count (overrides the scenario)
        #[arg(short, long)]
        paths: Option<usize>,

        /// Worker count (overrides the scenario; defaults to CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// RNG seed (overrides the scenario)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Solve the scenario's calibration target and validate the solution
    Calibrate {
        /// Path to the TOML scenario file
        #[arg(short, long)]
        scenario: String,

        /// Total Monte Carlo path count (overrides the scenario)
        #[arg(short, long)]
        paths: Option<usize>,

        /// Worker count (overrides the scenario; defaults to CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// RNG seed (overrides the scenario)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Price {
            scenario,
            paths,
            workers,
            seed,
            format,
        } => commands::price::run(
            &scenario,
            SimulationOverrides {
                n_paths: paths,
                workers,
                seed,
            },
            OutputFormat::parse(&format)?,
        ),
        Commands::Calibrate {
            scenario,
            paths,
            workers,
            seed,
            format,
        } => commands::calibrate::run(
            &scenario,
            SimulationOverrides {
                n_paths: paths,
                workers,
                seed,
            },
            OutputFormat::parse(&format)?,
        ),
    }
}
