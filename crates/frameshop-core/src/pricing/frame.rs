//! Frame moulding pricer.

use rust_decimal::Decimal;
use tracing::debug;

use super::ComponentPrice;
use crate::config::FrameCalibration;
use crate::error::{PricingError, PricingResult};
use crate::money::checked_product;
use crate::types::{FramePricingMethod, PriceComponent};
use crate::validation::validate_wholesale_price;

/// Prices a frame from its wholesale cost per linear foot.
///
/// ## Formula
/// ```text
/// billed_feet = max(perimeter_feet, minimum_billable_feet)
/// retail      = wholesale_per_foot × method_factor × billed_feet
///               × multiplier(wholesale_per_foot) × scale
/// wholesale   = wholesale_per_foot × method_factor × perimeter_feet
/// ```
///
/// ## Errors
/// - `InvalidGeometry` when `perimeter_feet ≤ 0`
/// - `InvalidWholesalePrice` when the price is negative or too large
/// - `AmountOutOfRange` when the calibration pushes an amount past `Decimal`
///
/// ## Example
/// ```rust
/// use frameshop_core::config::FrameCalibration;
/// use frameshop_core::pricing::price_frame;
/// use frameshop_core::types::FramePricingMethod;
/// use rust_decimal_macros::dec;
///
/// // $10/ft moulding, 3 ft perimeter: billed as 4 ft, top tier (2.25×)
/// let price = price_frame(
///     &FrameCalibration::default(),
///     dec!(10.00),
///     dec!(3),
///     FramePricingMethod::Chop,
/// )
/// .unwrap();
/// assert_eq!(price.retail, dec!(90.00));
/// ```
pub fn price_frame(
    calibration: &FrameCalibration,
    wholesale_per_foot: Decimal,
    perimeter_feet: Decimal,
    method: FramePricingMethod,
) -> PricingResult<ComponentPrice> {
    validate_wholesale_price(PriceComponent::Frame, wholesale_per_foot)?;
    if perimeter_feet <= Decimal::ZERO {
        return Err(PricingError::geometry("perimeter_feet", perimeter_feet));
    }

    let billed_feet = perimeter_feet.max(calibration.minimum_billable_feet);
    let (tier_index, tier) = calibration.markup.resolve_indexed(wholesale_per_foot);
    let unit_cost = checked_product(&[wholesale_per_foot, calibration.method_factor(method)])?;

    let retail = checked_product(&[
        unit_cost,
        billed_feet,
        tier.value.multiplier,
        calibration.scale,
    ])?;
    let wholesale = checked_product(&[unit_cost, perimeter_feet])?;

    debug!(
        wholesale_per_foot = %wholesale_per_foot,
        billed_feet = %billed_feet,
        method = %method,
        tier = tier_index,
        multiplier = %tier.value.multiplier,
        retail = %retail,
        "Priced frame"
    );

    Ok(ComponentPrice::new(retail, wholesale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn calibration() -> FrameCalibration {
        FrameCalibration::default()
    }

    #[test]
    fn test_minimum_billable_length() {
        let short = price_frame(&calibration(), dec!(10), dec!(3), FramePricingMethod::Chop).unwrap();
        let four = price_frame(&calibration(), dec!(10), dec!(4), FramePricingMethod::Chop).unwrap();
        assert_eq!(short.retail, four.retail);
        assert_eq!(short.retail, dec!(90.00));
        // wholesale follows the real perimeter
        assert_eq!(short.wholesale, dec!(30));
    }

    #[test]
    fn test_longer_frames_bill_actual_length() {
        // $3.50/ft falls in the 3.50× tier; 6 ft perimeter
        let price = price_frame(&calibration(), dec!(3.50), dec!(6), FramePricingMethod::Chop).unwrap();
        assert_eq!(price.retail, dec!(73.50));
    }

    #[test]
    fn test_tier_boundary_in_cents() {
        let at_edge = price_frame(&calibration(), dec!(1.99), dec!(5), FramePricingMethod::Chop).unwrap();
        let next = price_frame(&calibration(), dec!(2.00), dec!(5), FramePricingMethod::Chop).unwrap();
        assert_eq!(at_edge.retail, dec!(1.99) * dec!(5) * dec!(4.00));
        assert_eq!(next.retail, dec!(2.00) * dec!(5) * dec!(3.50));
    }

    #[test]
    fn test_method_factor_applies() {
        let chop = price_frame(&calibration(), dec!(5), dec!(8), FramePricingMethod::Chop).unwrap();
        let length = price_frame(&calibration(), dec!(5), dec!(8), FramePricingMethod::Length).unwrap();
        let join = price_frame(&calibration(), dec!(5), dec!(8), FramePricingMethod::Join).unwrap();
        assert_eq!(length.retail, chop.retail * dec!(1.15));
        assert_eq!(join.retail, chop.retail * dec!(1.10));
    }

    #[test]
    fn test_scale_applied_once() {
        let mut scaled = calibration();
        scaled.scale = dec!(0.5);
        let full = price_frame(&calibration(), dec!(6), dec!(10), FramePricingMethod::Chop).unwrap();
        let half = price_frame(&scaled, dec!(6), dec!(10), FramePricingMethod::Chop).unwrap();
        assert_eq!(half.retail * dec!(2), full.retail);
        assert_eq!(half.wholesale, full.wholesale);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            price_frame(&calibration(), dec!(5), dec!(0), FramePricingMethod::Chop),
            Err(PricingError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            price_frame(&calibration(), dec!(-1), dec!(5), FramePricingMethod::Chop),
            Err(PricingError::InvalidWholesalePrice { .. })
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            price_frame(&calibration(), dec!(1e27), dec!(3), FramePricingMethod::Chop),
            Err(PricingError::InvalidWholesalePrice { .. })
        ));

        let mut extreme = calibration();
        extreme.scale = dec!(1e24);
        assert!(matches!(
            price_frame(&extreme, dec!(1000000), dec!(2500), FramePricingMethod::Chop),
            Err(PricingError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_free_moulding_prices_to_zero() {
        let price = price_frame(&calibration(), dec!(0), dec!(5), FramePricingMethod::Chop).unwrap();
        assert_eq!(price, ComponentPrice::ZERO);
    }
}
