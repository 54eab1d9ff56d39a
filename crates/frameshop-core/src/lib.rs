//! # frameshop-core: Pure Pricing Engine for Custom Framing
//!
//! This crate is the **heart** of the frameshop pricing stack. It turns
//! wholesale catalog prices plus frame geometry into a retail price
//! breakdown, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Frameshop Pricing Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Order form / live price preview / frameshop-quote       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteRequest                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ frameshop-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  markup   │  │  pricing  │  │   labor   │  │ aggregate │  │   │
//! │  │   │ TierTable │─►│ frame mat │─►│ estimator │─►│ subtotal  │  │   │
//! │  │   │  resolve  │  │ glass bck │  │  hours    │  │ tax total │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ PricingConfig                          │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │            frameshop-config (TOML + environment)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Geometry, catalog records, AreaRate, Rate)
//! - [`money`] - Money type for final amounts in integer cents
//! - [`error`] - Domain error types
//! - [`validation`] - Geometry, quantity and rate checks
//! - [`markup`] - Tiered markup tables
//! - [`config`] - Pricing calibration
//! - [`pricing`] - Frame, mat, glass and backing pricers
//! - [`labor`] - Labor time and cost estimation
//! - [`aggregate`] - Subtotal, tax, totals and profitability
//! - [`engine`] - End-to-end quote orchestration
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, down to the cent
//! 2. **No I/O**: configuration is loaded elsewhere and passed in
//! 3. **Exact Decimals**: intermediate math in `Decimal`, rounded to cents once
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use frameshop_core::engine::{PricingEngine, ProfitabilityAccess, QuoteRequest};
//! use frameshop_core::types::{FrameRecord, Geometry};
//! use rust_decimal_macros::dec;
//!
//! let engine = PricingEngine::with_defaults();
//!
//! let request = QuoteRequest::new(Geometry::new(dec!(16), dec!(20), dec!(0)))
//!     .with_frame(FrameRecord::priced("FR-OAK-2", dec!(10.00)));
//!
//! let breakdown = engine.quote(&request, ProfitabilityAccess::Withheld).unwrap();
//! assert!(breakdown.frame.cents() > 0);
//! assert_eq!(breakdown.grand_total, breakdown.total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod labor;
pub mod markup;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use frameshop_core::Money` instead of
// `use frameshop_core::money::Money`

pub use aggregate::PriceBreakdown;
pub use config::PricingConfig;
pub use engine::{PricingEngine, ProfitabilityAccess, QuoteRequest};
pub use error::{PricingError, PricingResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest accepted artwork dimension or mat border, in inches.
///
/// ## Business Reason
/// No shop frames anything near 833 ft on a side; larger values are typos
/// (or unit mix-ups) and would only push the arithmetic towards overflow.
pub const MAX_DIMENSION_INCHES: u32 = 10_000;

/// Largest accepted wholesale unit price ($/ft, $/sq-in or $/sq-ft).
pub const MAX_WHOLESALE_PRICE: u32 = 1_000_000;

/// Square inches in a square foot.
pub const SQUARE_INCHES_PER_SQUARE_FOOT: u32 = 144;

/// Inches in a foot.
pub const INCHES_PER_FOOT: u32 = 12;
