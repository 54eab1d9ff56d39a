//! Glazing pricer.

use rust_decimal::Decimal;
use tracing::debug;

use super::ComponentPrice;
use crate::config::GlassCalibration;
use crate::error::{PricingError, PricingResult};
use crate::money::{checked_product, checked_sum};
use crate::types::{AreaRate, GlassType, PriceComponent};
use crate::validation::validate_wholesale_price;

/// Prices glazing over the outer opening.
///
/// ## Formula
/// ```text
/// retail    = base_charge(UI)
///             + area_sq_ft × price_per_sq_ft × multiplier(UI)
///               × type_multiplier × scale
/// wholesale = area_sq_in × price_per_sq_in
/// ```
///
/// ## Example
/// ```rust
/// use frameshop_core::config::GlassCalibration;
/// use frameshop_core::pricing::price_glass;
/// use frameshop_core::types::{AreaRate, GlassType};
/// use rust_decimal_macros::dec;
///
/// // 30 × 24 regular glass at $0.02/sq-in:
/// // 15 + 5 sq-ft × 2.88 × 2.25 × 1.0 × 1.10
/// let price = price_glass(
///     &GlassCalibration::default(),
///     AreaRate::per_square_inch(dec!(0.02)),
///     dec!(720),
///     dec!(54),
///     GlassType::Regular,
/// )
/// .unwrap();
/// assert_eq!(price.retail, dec!(50.64));
/// ```
pub fn price_glass(
    calibration: &GlassCalibration,
    wholesale: AreaRate,
    area: Decimal,
    united_inches: Decimal,
    glass_type: GlassType,
) -> PricingResult<ComponentPrice> {
    validate_wholesale_price(PriceComponent::Glass, wholesale.amount)?;
    if area <= Decimal::ZERO {
        return Ok(ComponentPrice::ZERO);
    }
    if united_inches <= Decimal::ZERO {
        return Err(PricingError::geometry("united_inches", united_inches));
    }

    let base_charge = calibration.base_charge.resolve(united_inches).value.charge;
    let (tier_index, tier) = calibration.markup.resolve_indexed(united_inches);
    let type_multiplier = calibration.type_multiplier(glass_type);

    // area_sq_ft × price_per_sq_ft is the same amount as the material cost
    let cost = wholesale.cost_of(area)?;
    let marked_up = checked_product(&[
        cost,
        tier.value.multiplier,
        type_multiplier,
        calibration.scale,
    ])?;
    let retail = checked_sum(&[base_charge, marked_up])?;

    debug!(
        area = %area,
        united_inches = %united_inches,
        glass_type = %glass_type,
        tier = tier_index,
        multiplier = %tier.value.multiplier,
        base_charge = %base_charge,
        retail = %retail,
        "Priced glass"
    );

    Ok(ComponentPrice::new(retail, cost))
}
