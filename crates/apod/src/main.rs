// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! apod - Astronomy Picture of the Day over a request/reply socket.
//!
//! This is the binary entry point: `serve` runs the service, `client` opens
//! an interactive test client, and `config` prints the resolved settings.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod client;
mod serve;
mod show_config;

use std::path::PathBuf;

use apod_config::ApodConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;

/// apod - Astronomy Picture of the Day over a request/reply socket.
#[derive(Parser, Debug)]
#[command(name = "apod", version, about, long_about = None)]
struct Cli {
    /// Load this file instead of the standard config locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the APOD service on its reply socket.
    Serve,
    /// Send messages to a running service interactively.
    Client,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => apod_config::load_and_validate_path(path),
        None => apod_config::load_and_validate(),
    };
    let config: ApodConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            apod_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Client) => client::run_client(config).await,
        Some(Commands::Config) => show_config::run_config(&config),
        None => {
            println!("apod: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the global tracing subscriber. `RUST_LOG` overrides `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("apod={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
