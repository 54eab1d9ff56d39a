//! # Component Pricers
//!
//! One pure function per physical component. Each takes a wholesale unit
//! price plus the geometry measure it is billed on and returns the exact
//! (unrounded) retail and wholesale amounts.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FinishedGeometry                                                       │
//! │   ├── perimeter_feet ─────────► price_frame   (keyed by $/ft)           │
//! │   ├── mat_area, united_inches ► price_mat     (keyed by finished UI)    │
//! │   ├── outer_area, united ─────► price_glass   (keyed by UI)             │
//! │   └── outer_area ─────────────► price_backing (flat)                    │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                            ComponentPrice { retail, wholesale }        │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                            aggregate() rounds to cents once             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricers share no state and may run in any order.

mod backing;
mod frame;
mod glass;
mod mat;

pub use backing::price_backing;
pub use frame::price_frame;
pub use glass::price_glass;
pub use mat::price_mat;

use rust_decimal::Decimal;

/// Exact retail and wholesale amounts for one component.
///
/// `wholesale` is what the shop pays for the material actually used; it only
/// surfaces in a breakdown when profitability is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentPrice {
    pub retail: Decimal,
    pub wholesale: Decimal,
}

impl ComponentPrice {
    /// Nothing to charge (component not selected, or empty area).
    pub const ZERO: ComponentPrice = ComponentPrice {
        retail: Decimal::ZERO,
        wholesale: Decimal::ZERO,
    };

    pub fn new(retail: Decimal, wholesale: Decimal) -> Self {
        ComponentPrice { retail, wholesale }
    }
}
