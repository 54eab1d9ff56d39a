//! # Error Types
//!
//! Domain-specific error types for frameshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  frameshop-core errors (this file)                                     │
//! │  └── PricingError                                                      │
//! │      ├── Input        InvalidGeometry, InvalidQuantity,                │
//! │      │                InvalidWholesalePrice, MissingWholesalePrice     │
//! │      ├── Calibration  UnresolvableTier, InvalidMarkupTable,            │
//! │      │                InvalidRate                                      │
//! │      └── Arithmetic   AmountOutOfRange                                 │
//! │                                                                         │
//! │  frameshop-config errors (separate crate)                              │
//! │  └── ConfigError      - Loading/saving pricing.toml                    │
//! │                                                                         │
//! │  Flow: PricingError → ConfigError / web layer → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, table, item ID)
//! 3. A failed price request never returns a partial breakdown

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::PriceComponent;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing engine errors.
///
/// Nothing in the engine is transient: identical inputs always fail the
/// same way, so none of these are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A dimension is zero or negative, or a mat border is negative.
    ///
    /// ## When This Occurs
    /// - Artwork width/height ≤ 0
    /// - Mat border < 0
    /// - Perimeter or united inches handed directly to a pricer ≤ 0
    #[error("Invalid geometry: {field} = {value}")]
    InvalidGeometry { field: String, value: Decimal },

    /// Quantity is zero or negative.
    #[error("Invalid quantity {quantity}: must be a positive integer")]
    InvalidQuantity { quantity: i64 },

    /// A markup table has no tiers.
    ///
    /// Raised when the table is built (or deserialized), never while pricing.
    #[error("Markup table '{table}' has no tiers")]
    UnresolvableTier { table: String },

    /// A markup table's tiers are unsorted, overlapping or leave a gap.
    #[error("Markup table '{table}' is invalid: {reason}")]
    InvalidMarkupTable { table: String, reason: String },

    /// A selected catalog item has no wholesale price and the configured
    /// policy forbids substituting the default.
    ///
    /// ## User Workflow
    /// ```text
    /// Quote: mat "MAT-ALPINE" selected
    ///      │
    ///      ▼
    /// mat.price = None, policy = Reject
    ///      │
    ///      ▼
    /// MissingWholesalePrice { component: mat, item_id: "MAT-ALPINE" }
    ///      │
    ///      ▼
    /// UI shows: "MAT-ALPINE has no wholesale price"
    /// ```
    #[error("{component} item '{item_id}' has no wholesale price")]
    MissingWholesalePrice {
        component: PriceComponent,
        item_id: String,
    },

    /// A wholesale price is negative or above [`crate::MAX_WHOLESALE_PRICE`].
    #[error("Invalid wholesale price for {component}: {value}")]
    InvalidWholesalePrice {
        component: PriceComponent,
        value: Decimal,
    },

    /// A calibration rate or factor is out of range.
    #[error("Invalid rate {field} = {value}")]
    InvalidRate { field: String, value: Decimal },

    /// An amount overflowed while pricing, or does not fit in i64 cents
    /// once rounded.
    #[error("Amount {value} is out of range")]
    AmountOutOfRange { value: Decimal },
}

impl PricingError {
    /// Returns true if the caller supplied bad input (as opposed to a bad
    /// calibration).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidGeometry { .. }
                | PricingError::InvalidQuantity { .. }
                | PricingError::MissingWholesalePrice { .. }
                | PricingError::InvalidWholesalePrice { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PricingError::UnresolvableTier { .. }
                | PricingError::InvalidMarkupTable { .. }
                | PricingError::InvalidRate { .. }
        )
    }

    pub(crate) fn geometry(field: &str, value: Decimal) -> Self {
        PricingError::InvalidGeometry {
            field: field.to_string(),
            value,
        }
    }

    pub(crate) fn rate(field: &str, value: Decimal) -> Self {
        PricingError::InvalidRate {
            field: field.to_string(),
            value,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = PricingError::MissingWholesalePrice {
            component: PriceComponent::Mat,
            item_id: "MAT-ALPINE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mat item 'MAT-ALPINE' has no wholesale price"
        );

        let err = PricingError::geometry("artwork_width", dec!(-2));
        assert_eq!(err.to_string(), "Invalid geometry: artwork_width = -2");

        let err = PricingError::InvalidQuantity { quantity: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid quantity 0: must be a positive integer"
        );
    }

    #[test]
    fn test_error_categories() {
        assert!(PricingError::geometry("mat_width", dec!(-1)).is_input_error());
        assert!(!PricingError::geometry("mat_width", dec!(-1)).is_config_error());

        let err = PricingError::UnresolvableTier {
            table: "frame".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_input_error());

        let err = PricingError::AmountOutOfRange { value: dec!(1) };
        assert!(!err.is_config_error());
        assert!(!err.is_input_error());
    }
}
