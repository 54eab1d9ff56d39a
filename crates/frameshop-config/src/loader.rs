//! # Configuration Loader
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FRAMESHOP_TAX_RATE_BPS=825                                         │
//! │     FRAMESHOP_OVERHEAD_RATE_BPS=3000                                   │
//! │     FRAMESHOP_LABOR_RATE=52.50                                         │
//! │     FRAMESHOP_REGIONAL_FACTOR=1.15                                     │
//! │     FRAMESHOP_MISSING_PRICE_POLICY=reject                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/frameshop/pricing.toml (Linux)                           │
//! │     ~/Library/Application Support/com.frameshop.frameshop/ (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     PricingConfig::default()                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is validated before it is returned, so a loaded config can go
//! straight into `PricingEngine::new`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use frameshop_core::config::MissingPricePolicy;
use frameshop_core::{PricingConfig, Rate};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pricing.toml";

pub const ENV_TAX_RATE_BPS: &str = "FRAMESHOP_TAX_RATE_BPS";
pub const ENV_OVERHEAD_RATE_BPS: &str = "FRAMESHOP_OVERHEAD_RATE_BPS";
pub const ENV_LABOR_RATE: &str = "FRAMESHOP_LABOR_RATE";
pub const ENV_REGIONAL_FACTOR: &str = "FRAMESHOP_REGIONAL_FACTOR";
pub const ENV_MISSING_PRICE_POLICY: &str = "FRAMESHOP_MISSING_PRICE_POLICY";

// =============================================================================
// Config Loader
// =============================================================================

/// Loads and saves the pricing configuration.
///
/// ## Example
/// ```rust,no_run
/// use frameshop_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load().unwrap();
/// println!("tax rate: {}", config.tax_rate_bps);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// A loader using the platform config path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader using an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            path: Some(path.into()),
        }
    }

    /// A loader that uses `path` when given, else the platform path.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        ConfigLoader { path }
    }

    /// The file this loader reads and writes.
    pub fn path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(default_config_path)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml), if it exists
    /// 3. Environment variables
    pub fn load(&self) -> ConfigResult<PricingConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading overrides through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(&self, lookup: F) -> ConfigResult<PricingConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.path() {
            Some(path) if path.exists() => {
                info!(?path, "Loading pricing config from file");
                read_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                PricingConfig::default()
            }
            None => {
                debug!("No config directory available, using defaults");
                PricingConfig::default()
            }
        };

        apply_overrides_from(&mut config, lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(&self) -> PricingConfig {
        self.load().unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            PricingConfig::default()
        })
    }

    /// Writes `config` as pretty TOML, creating parent directories.
    ///
    /// Returns the path written.
    pub fn save(&self, config: &PricingConfig) -> ConfigResult<PathBuf> {
        config.validate()?;
        let path = self.path().ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let contents = toml::to_string_pretty(config)?;
        std::fs::write(&path, contents)
            .map_err(|e| ConfigError::SaveFailed(format!("{}: {}", path.display(), e)))?;

        info!(?path, "Pricing config saved");
        Ok(path)
    }
}

/// Parses a config file without applying overrides or validation.
pub fn read_file(path: &Path) -> ConfigResult<PricingConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;
    Ok(toml::from_str(&contents)?)
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "frameshop", "frameshop")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// =============================================================================
// Environment Overrides
// =============================================================================

/// Applies `FRAMESHOP_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut PricingConfig) -> ConfigResult<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Applies overrides read through `lookup`.
///
/// A variable that is set but unparsable is an error rather than being
/// skipped, so a typo cannot silently price with the wrong tax rate.
pub fn apply_overrides_from<F>(config: &mut PricingConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bps) = parse_var::<u32, _>(&lookup, ENV_TAX_RATE_BPS)? {
        debug!(bps, "Overriding tax rate from environment");
        config.tax_rate_bps = Rate::from_bps(bps);
    }

    if let Some(bps) = parse_var::<u32, _>(&lookup, ENV_OVERHEAD_RATE_BPS)? {
        debug!(bps, "Overriding overhead rate from environment");
        config.overhead_rate_bps = Rate::from_bps(bps);
    }

    if let Some(rate) = parse_var::<Decimal, _>(&lookup, ENV_LABOR_RATE)? {
        debug!(rate = %rate, "Overriding base hourly rate from environment");
        config.labor.base_hourly_rate = rate;
    }

    if let Some(factor) = parse_var::<Decimal, _>(&lookup, ENV_REGIONAL_FACTOR)? {
        debug!(factor = %factor, "Overriding regional factor from environment");
        config.labor.regional_factor = factor;
    }

    if let Some(policy) = parse_var::<MissingPricePolicy, _>(&lookup, ENV_MISSING_PRICE_POLICY)? {
        debug!(policy = %policy, "Overriding missing price policy from environment");
        config.missing_price_policy = policy;
    }

    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = PricingConfig::default();
        apply_overrides_from(
            &mut config,
            lookup(&[
                (ENV_TAX_RATE_BPS, "825"),
                (ENV_OVERHEAD_RATE_BPS, " 2500 "),
                (ENV_LABOR_RATE, "52.50"),
                (ENV_REGIONAL_FACTOR, "1.15"),
                (ENV_MISSING_PRICE_POLICY, "reject"),
            ]),
        )
        .unwrap();

        assert_eq!(config.tax_rate_bps, Rate::from_bps(825));
        assert_eq!(config.overhead_rate_bps, Rate::from_bps(2500));
        assert_eq!(config.labor.base_hourly_rate, dec!(52.50));
        assert_eq!(config.labor.regional_factor, dec!(1.15));
        assert_eq!(config.missing_price_policy, MissingPricePolicy::Reject);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = PricingConfig::default();
        apply_overrides_from(&mut config, lookup(&[])).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_unparsable_override_is_an_error() {
        let mut config = PricingConfig::default();
        let err = apply_overrides_from(&mut config, lookup(&[(ENV_TAX_RATE_BPS, "8%")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, ref value } if key == ENV_TAX_RATE_BPS && value == "8%"
        ));

        let err = apply_overrides_from(&mut config, lookup(&[(ENV_MISSING_PRICE_POLICY, "zero")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let loader = ConfigLoader::with_path("/tmp/frameshop-test/pricing.toml");
        assert_eq!(
            loader.path(),
            Some(PathBuf::from("/tmp/frameshop-test/pricing.toml"))
        );
    }

    #[test]
    fn test_unreadable_file_names_the_path() {
        let path = Path::new("/nonexistent/frameshop/pricing.toml");
        let err = read_file(path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed(ref msg) if msg.starts_with("/nonexistent/frameshop/pricing.toml: ")));
        assert!(err.is_file_error());
    }
}
