//! Config command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use frameshop_config::{ConfigError, ConfigLoader};
use frameshop_core::PricingConfig;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (file plus environment)
    Show(ShowArgs),

    /// Print the config file path
    Path,

    /// Write the default calibration to the config file
    Init(InitArgs),

    /// Load and validate the config without pricing anything
    Check,
}

/// Arguments for `config show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print every calibration table as TOML
    #[arg(long)]
    pub full: bool,
}

/// Arguments for `config init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, config_path: Option<PathBuf>) -> Result<()> {
    let loader = ConfigLoader::from_option(config_path);

    match args.command {
        ConfigCommand::Show(show) => execute_show(&loader, show, format),
        ConfigCommand::Path => execute_path(&loader),
        ConfigCommand::Init(init) => execute_init(&loader, init),
        ConfigCommand::Check => execute_check(&loader),
    }
}

fn execute_show(loader: &ConfigLoader, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let config = loader.load().context("loading pricing config")?;

    match format {
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Table if args.full => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        OutputFormat::Table => {
            print_header("Pricing Configuration");
            print_table(&summary_rows(&config));
        }
    }
    Ok(())
}

fn execute_path(loader: &ConfigLoader) -> Result<()> {
    let path = loader.path().ok_or(ConfigError::NoConfigPath)?;
    println!("{}", path.display());
    Ok(())
}

fn execute_init(loader: &ConfigLoader, args: InitArgs) -> Result<()> {
    let path = loader.path().ok_or(ConfigError::NoConfigPath)?;
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let written = loader.save(&PricingConfig::default())?;
    println!("Wrote default pricing config to {}", written.display());
    Ok(())
}

fn execute_check(loader: &ConfigLoader) -> Result<()> {
    loader.load().context("pricing config is invalid")?;
    println!("Pricing config OK");
    Ok(())
}

/// Headline settings, one row each.
pub fn summary_rows(config: &PricingConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Tax rate", config.tax_rate_bps),
        KeyValue::new("Overhead rate", config.overhead_rate_bps),
        KeyValue::new("Missing price policy", config.missing_price_policy),
        KeyValue::new("Base hourly rate", config.labor.base_hourly_rate),
        KeyValue::new("Regional factor", config.labor.regional_factor),
        KeyValue::new("Minimum billable feet", config.frame.minimum_billable_feet),
        KeyValue::new("Default frame $/ft", config.defaults.frame_per_foot),
        KeyValue::new("Default mat $/sq-ft", config.defaults.mat.price_per_square_foot()),
        KeyValue::new("Default glass $/sq-in", config.defaults.glass.price_per_square_inch()),
    ]
}
