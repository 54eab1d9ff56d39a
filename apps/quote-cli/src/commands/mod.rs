//! Command implementations.

pub mod config;
pub mod quote;

pub use config::ConfigArgs;
pub use quote::QuoteArgs;
