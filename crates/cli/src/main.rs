//! Geo Addresses CLI - Database setup and query tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database file and table
//! geo-cli init
//!
//! # Load addresses from a YAML file
//! geo-cli seed fixtures/addresses.yaml
//!
//! # List addresses within 5 km of a point
//! geo-cli nearby --latitude 40.7484 --longitude -73.9857 --max-distance 5
//! ```
//!
//! # Commands
//!
//! - `init` - Create the database and `addresses` table
//! - `seed` - Insert addresses from a YAML file
//! - `nearby` - Run a proximity query against the database

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "geo-cli")]
#[command(author, version, about = "Geo Addresses CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and addresses table
    Init,
    /// Insert addresses from a YAML file
    Seed {
        /// Path to a YAML list of addresses
        file: PathBuf,
    },
    /// List addresses within a radius of a point
    Nearby {
        /// Origin latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        /// Origin longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        /// Radius in kilometers (inclusive)
        #[arg(long)]
        max_distance: f64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Nearby {
            latitude,
            longitude,
            max_distance,
        } => commands::nearby::run(latitude, longitude, max_distance).await?,
    }
    Ok(())
}
