//! # Configuration Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   File I/O      │  │   Environment   │  │     Calibration         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  LoadFailed     │  │  InvalidValue   │  │  Invalid(PricingError)  │ │
//! │  │  SaveFailed     │  │  {key, value}   │  │  rates, factors, tiers  │ │
//! │  │  NoConfigPath   │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use frameshop_core::PricingError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and saving failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    ///
    /// Malformed markup tables land here too: tables validate themselves
    /// while being deserialized.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// The file could not be written.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    /// No explicit path was given and the platform has no config directory.
    #[error("No config path available")]
    NoConfigPath,

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// The loaded calibration failed validation.
    #[error("Invalid pricing configuration: {0}")]
    Invalid(#[from] PricingError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl ConfigError {
    /// Returns true if the file or its contents are at fault, as opposed to
    /// the environment.
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            ConfigError::LoadFailed(_) | ConfigError::SaveFailed(_) | ConfigError::NoConfigPath
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidValue {
            key: "FRAMESHOP_TAX_RATE_BPS".to_string(),
            value: "eight".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for FRAMESHOP_TAX_RATE_BPS: 'eight'");
        assert!(!err.is_file_error());
    }

    #[test]
    fn test_pricing_error_conversion() {
        let pricing = PricingError::InvalidRate {
            field: "labor.regional_factor".to_string(),
            value: dec!(-1),
        };
        let err: ConfigError = pricing.into();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("labor.regional_factor"));
    }

    #[test]
    fn test_toml_error_is_load_failure() {
        let toml_err = toml::from_str::<toml::Table>("tax_rate_bps = ").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
        assert!(err.is_file_error());
    }
}
