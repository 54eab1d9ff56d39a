//! Frameshop quote CLI - price previews from the command line.
//!
//! # Usage
//!
//! ```bash
//! # 16x20 print, 2" mat, priced moulding and board
//! frameshop-quote quote --width 16 --height 20 --mat-width 2 \
//!     --frame M-1024 --frame-price 3.75 --mat WHITE-8ply --mat-price 4.00
//!
//! # Same, as JSON with cost data
//! frameshop-quote --format json quote --width 16 --height 20 --show-costs
//!
//! # Price a saved request
//! frameshop-quote quote --request order.json
//!
//! # Where the config lives, and write the defaults there
//! frameshop-quote config path
//! frameshop-quote config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.quiet);

    let format = cli.format;
    let config_path = cli.config;

    match cli.command {
        Commands::Quote(args) => commands::quote::execute(args, format, config_path)?,
        Commands::Config(args) => commands::config::execute(args, format, config_path)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--quiet`.
fn init_tracing(quiet: bool) {
    let fallback = if quiet { "warn" } else { "info,frameshop=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
