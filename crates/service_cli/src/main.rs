//! optval CLI - command line front end for the option valuation engines
//!
//! # Commands
//!
//! - `optval price <request.toml>` - Value the contract described by a request file
//! - `optval check` - Reproduce the American put reference value
//!
//! Logging goes to stderr. `RUST_LOG` wins over `--verbose`, which wins
//! over the request's `log_level` (itself overridable by `PRICER_LOG_LEVEL`).

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{LogLevel, ValuationRequest};

/// Binomial lattice and Monte Carlo option valuation
#[derive(Parser)]
#[command(name = "optval")]
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
    /// Price the contract described by a TOML request
    Price {
        /// Path to the request file
        request: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Verify the engine against the reference American put
    Check,
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Price { request, format } => {
            let loaded = ValuationRequest::from_file(Path::new(&request))
                .with_context(|| format!("failed to load {}", request))?;
            init_tracing(if cli.verbose {
                LogLevel::Debug
            } else {
                loaded.log_level
            });
            info!("Pricing request {}", request);
            commands::price::run(&loaded, &format)
                .with_context(|| format!("failed to price {}", request))
        }
        Commands::Check => {
            init_tracing(if cli.verbose {
                LogLevel::Debug
            } else {
                LogLevel::default()
            });
            commands::check::run().context("self-check failed")
        }
    }
}
