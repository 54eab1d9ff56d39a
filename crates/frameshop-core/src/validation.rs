//! # Validation Module
//!
//! Input checks run before any tier lookup or arithmetic.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form / CLI arguments                                     │
//! │  ├── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Geometry: 0 < width, height ≤ 10,000 in; 0 ≤ mat border ≤ 10,000 │
//! │  ├── Quantity: ≥ 1                                                     │
//! │  └── Prices and rates: non-negative, prices ≤ $1,000,000               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricers assume validated input                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frameshop_core::types::Geometry;
//! use frameshop_core::validation::{validate_geometry, validate_quantity};
//! use rust_decimal_macros::dec;
//!
//! assert!(validate_geometry(&Geometry::new(dec!(20), dec!(16), dec!(3))).is_ok());
//! assert!(validate_geometry(&Geometry::new(dec!(0), dec!(16), dec!(3))).is_err());
//! assert!(validate_quantity(3).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::{PricingError, PricingResult};
use crate::types::{Geometry, PriceComponent, Rate};
use crate::{MAX_DIMENSION_INCHES, MAX_WHOLESALE_PRICE};

// =============================================================================
// Geometry Validators
// =============================================================================

/// Validates that a dimension is strictly positive and at most
/// [`MAX_DIMENSION_INCHES`].
pub fn validate_dimension(field: &str, value: Decimal) -> PricingResult<()> {
    if value <= Decimal::ZERO || value > Decimal::from(MAX_DIMENSION_INCHES) {
        return Err(PricingError::geometry(field, value));
    }
    Ok(())
}

/// Validates artwork size and mat border.
///
/// ## Rules
/// - Artwork width and height must be > 0
/// - Mat border must be ≥ 0 (zero means no visible mat)
/// - None may exceed [`MAX_DIMENSION_INCHES`]
pub fn validate_geometry(geometry: &Geometry) -> PricingResult<()> {
    validate_dimension("artwork_width", geometry.artwork_width)?;
    validate_dimension("artwork_height", geometry.artwork_height)?;

    if geometry.mat_width < Decimal::ZERO
        || geometry.mat_width > Decimal::from(MAX_DIMENSION_INCHES)
    {
        return Err(PricingError::geometry("mat_width", geometry.mat_width));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0); there is no upper cap, overflow in the
///   quantity scaling surfaces as `AmountOutOfRange`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order: 3 identical frames                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?   → InvalidQuantity                                │
/// │       └── OK → grand total = unit total × 3                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> PricingResult<()> {
    if qty <= 0 {
        return Err(PricingError::InvalidQuantity { quantity: qty });
    }
    Ok(())
}

/// Validates a wholesale unit price.
///
/// Zero is allowed (free sample stock); negative is not, nor is anything
/// above [`MAX_WHOLESALE_PRICE`].
pub fn validate_wholesale_price(component: PriceComponent, value: Decimal) -> PricingResult<()> {
    if value < Decimal::ZERO || value > Decimal::from(MAX_WHOLESALE_PRICE) {
        return Err(PricingError::InvalidWholesalePrice { component, value });
    }
    Ok(())
}

/// Validates a basis-point rate.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate(field: &str, rate: Rate) -> PricingResult<()> {
    if rate.bps() > 10000 {
        return Err(PricingError::rate(field, rate.as_decimal()));
    }
    Ok(())
}

/// Validates a calibration factor (multiplier, hourly rate, coefficient).
pub fn validate_factor(field: &str, value: Decimal) -> PricingResult<()> {
    if value < Decimal::ZERO {
        return Err(PricingError::rate(field, value));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_geometry() {
        assert!(validate_geometry(&Geometry::new(dec!(20), dec!(16), dec!(0))).is_ok());
        assert!(validate_geometry(&Geometry::new(dec!(0.5), dec!(0.5), dec!(2))).is_ok());

        let err = validate_geometry(&Geometry::new(dec!(20), dec!(-1), dec!(0))).unwrap_err();
        assert_eq!(err, PricingError::geometry("artwork_height", dec!(-1)));

        let err = validate_geometry(&Geometry::new(dec!(20), dec!(16), dec!(-0.25))).unwrap_err();
        assert_eq!(err, PricingError::geometry("mat_width", dec!(-0.25)));

        assert!(validate_geometry(&Geometry::new(dec!(0), dec!(16), dec!(0))).is_err());

        assert!(validate_geometry(&Geometry::new(dec!(10000), dec!(10000), dec!(10000))).is_ok());
        let err = validate_geometry(&Geometry::new(dec!(1e15), dec!(16), dec!(0))).unwrap_err();
        assert_eq!(err, PricingError::geometry("artwork_width", dec!(1e15)));
        assert!(validate_geometry(&Geometry::new(dec!(20), dec!(16), dec!(10000.01))).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(PricingError::InvalidQuantity { quantity: 0 })
        );
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_wholesale_price() {
        assert!(validate_wholesale_price(PriceComponent::Frame, dec!(0)).is_ok());
        assert!(validate_wholesale_price(PriceComponent::Frame, dec!(3.25)).is_ok());
        assert!(validate_wholesale_price(PriceComponent::Frame, dec!(1000000)).is_ok());
        assert!(validate_wholesale_price(PriceComponent::Frame, dec!(1e27)).is_err());
        assert!(matches!(
            validate_wholesale_price(PriceComponent::Glass, dec!(-0.01)),
            Err(PricingError::InvalidWholesalePrice {
                component: PriceComponent::Glass,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("tax_rate_bps", Rate::from_bps(0)).is_ok());
        assert!(validate_rate("tax_rate_bps", Rate::from_bps(825)).is_ok());
        assert!(validate_rate("tax_rate_bps", Rate::from_bps(10000)).is_ok());
        assert!(validate_rate("tax_rate_bps", Rate::from_bps(10001)).is_err());
    }

    #[test]
    fn test_validate_factor() {
        assert!(validate_factor("regional_factor", dec!(1.15)).is_ok());
        assert!(validate_factor("regional_factor", dec!(0)).is_ok());
        assert!(validate_factor("regional_factor", dec!(-0.1)).is_err());
    }
}
