//! # frameshop-config: Pricing Configuration for Frameshop
//!
//! Owns every file-system and environment access needed to build a
//! [`PricingConfig`](frameshop_core::PricingConfig). The pricing engine
//! itself never reads files.
//!
//! ## Modules
//!
//! - [`loader`] - [`ConfigLoader`]: defaults → pricing.toml → environment
//! - [`error`] - [`ConfigError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use frameshop_config::ConfigLoader;
//! use frameshop_core::PricingEngine;
//!
//! let config = ConfigLoader::new().load_or_default();
//! let engine = PricingEngine::new(config).unwrap();
//! ```

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{apply_env_overrides, default_config_path, ConfigLoader};
