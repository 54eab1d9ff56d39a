//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, QuoteArgs};

/// Frameshop - custom framing price previews
#[derive(Parser)]
#[command(name = "frameshop-quote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pricing config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "FRAMESHOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a framing job
    Quote(QuoteArgs),

    /// Inspect or initialize the pricing configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "frameshop-quote",
            "quote",
            "--width",
            "8",
            "--height",
            "10",
            "--format",
            "json",
            "--config",
            "/tmp/pricing.toml",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pricing.toml")));
        assert!(matches!(cli.command, Commands::Quote(_)));
    }
}
