//! Binary entry point for marquee.
//!
//! Runs either of the two services: `marquee cast` starts the cast registry,
//! `marquee movie` starts the movie catalog.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use marquee::config::{CastServiceConfig, MovieServiceConfig};
use marquee::{cli, observability};
use std::path::PathBuf;
use std::process::ExitCode;

/// Marquee - cooperating cast-registry and movie-catalog services.
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the cast registry service.
    Cast {
        /// Port to listen on (overrides CAST_SERVICE_PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Database path; `:memory:` for an ephemeral store (overrides
        /// CAST_DATABASE_PATH).
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
    /// Run the movie catalog service.
    Movie {
        /// Port to listen on (overrides MOVIE_SERVICE_PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Database path; `:memory:` for an ephemeral store (overrides
        /// MOVIE_DATABASE_PATH).
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Base URL of the cast service's read endpoint (overrides
        /// CAST_SERVICE_HOST_URL).
        #[arg(long)]
        cast_service_url: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before any config reads the environment.
    dotenvy::dotenv().ok();
    observability::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("marquee: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Cast { port, database } => {
            let mut config = CastServiceConfig::from_env();
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(database) = database {
                config = config.with_database_path(database);
            }
            cli::run_cast_service(&config).context("cast service failed")
        },
        Commands::Movie {
            port,
            database,
            cast_service_url,
        } => {
            let mut config = MovieServiceConfig::from_env();
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(database) = database {
                config = config.with_database_path(database);
            }
            if let Some(url) = cast_service_url {
                config = config.with_cast_service_url(url);
            }
            cli::run_movie_service(&config).context("movie service failed")
        },
    }
}
