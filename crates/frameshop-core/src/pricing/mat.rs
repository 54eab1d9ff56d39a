//! Mat board pricer.

use rust_decimal::Decimal;
use tracing::debug;

use super::ComponentPrice;
use crate::config::MatCalibration;
use crate::error::{PricingError, PricingResult};
use crate::money::checked_product;
use crate::types::{AreaRate, PriceComponent};
use crate::validation::validate_wholesale_price;

/// Prices a mat from its visible board area.
///
/// ## Formula
/// ```text
/// tier      = mat table keyed by finished (outer) united inches
/// formula   = price_per_sq_in × mat_area × multiplier × scale
/// retail    = max(formula, tier minimum)
/// wholesale = price_per_sq_in × mat_area
/// ```
///
/// A mat with no visible area (zero border) costs nothing and skips the
/// tier lookup entirely, so the minimum does not apply.
///
/// ## Example
/// ```rust
/// use frameshop_core::config::MatCalibration;
/// use frameshop_core::pricing::price_mat;
/// use frameshop_core::types::AreaRate;
/// use rust_decimal_macros::dec;
///
/// // $4/sq-ft board, 400 sq-in visible, 54 UI finished: formula is
/// // $34.72, under the tier's $35 minimum
/// let price = price_mat(
///     &MatCalibration::default(),
///     AreaRate::per_square_foot(dec!(4)),
///     dec!(400),
///     dec!(54),
/// )
/// .unwrap();
/// assert_eq!(price.retail, dec!(35.00));
/// ```
pub fn price_mat(
    calibration: &MatCalibration,
    wholesale: AreaRate,
    mat_area: Decimal,
    finished_united_inches: Decimal,
) -> PricingResult<ComponentPrice> {
    validate_wholesale_price(PriceComponent::Mat, wholesale.amount)?;
    if mat_area <= Decimal::ZERO {
        return Ok(ComponentPrice::ZERO);
    }
    if finished_united_inches <= Decimal::ZERO {
        return Err(PricingError::geometry(
            "united_inches",
            finished_united_inches,
        ));
    }

    let (tier_index, tier) = calibration.markup.resolve_indexed(finished_united_inches);

    let material = wholesale.cost_of(mat_area)?;
    let formula = checked_product(&[material, tier.value.multiplier, calibration.scale])?;
    let retail = formula.max(tier.value.floor());

    debug!(
        mat_area = %mat_area,
        united_inches = %finished_united_inches,
        tier = tier_index,
        multiplier = %tier.value.multiplier,
        minimum = %tier.value.floor(),
        formula = %formula,
        retail = %retail,
        "Priced mat"
    );

    Ok(ComponentPrice::new(retail, material))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn calibration() -> MatCalibration {
        MatCalibration::default()
    }

    #[test]
    fn test_minimum_charge_floors_small_mats() {
        let price = price_mat(
            &calibration(),
            AreaRate::per_square_foot(dec!(4)),
            dec!(400),
            dec!(54),
        )
        .unwrap();
        assert_eq!(price.retail, dec!(35.00));
        assert!(price.wholesale < dec!(11.12) && price.wholesale > dec!(11.11));
    }

    #[test]
    fn test_formula_wins_above_minimum() {
        // $0.05/sq-in, 460 sq-in, 56 UI: 0.05 × 460 × 2.50 × 1.25 = 71.875
        let price = price_mat(
            &calibration(),
            AreaRate::per_square_inch(dec!(0.05)),
            dec!(460),
            dec!(56),
        )
        .unwrap();
        assert_eq!(price.retail, dec!(71.875));
        assert_eq!(price.wholesale, dec!(23));
    }

    #[test]
    fn test_units_are_not_confused() {
        let per_foot = price_mat(
            &calibration(),
            AreaRate::per_square_foot(dec!(7.20)),
            dec!(460),
            dec!(56),
        )
        .unwrap();
        let per_inch = price_mat(
            &calibration(),
            AreaRate::per_square_inch(dec!(0.05)),
            dec!(460),
            dec!(56),
        )
        .unwrap();
        assert_eq!(per_foot.retail, per_inch.retail);
    }

    #[test]
    fn test_partial_inch_rounds_into_next_tier() {
        // 48.25 UI bills as 49, the 2.50× / $35 tier
        let price = price_mat(&calibration(), AreaRate::per_square_inch(dec!(0)), dec!(100), dec!(48.25)).unwrap();
        assert_eq!(price.retail, dec!(35.00));
        let price = price_mat(&calibration(), AreaRate::per_square_inch(dec!(0)), dec!(100), dec!(48)).unwrap();
        assert_eq!(price.retail, dec!(28.00));
    }

    #[test]
    fn test_zero_area_is_free() {
        let price = price_mat(&calibration(), AreaRate::per_square_foot(dec!(4)), dec!(0), dec!(54)).unwrap();
        assert_eq!(price, ComponentPrice::ZERO);
    }

    #[test]
    fn test_oversized_area_is_an_error() {
        assert!(matches!(
            price_mat(&calibration(), AreaRate::per_square_inch(dec!(1000)), dec!(1e27), dec!(54)),
            Err(PricingError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            price_mat(&calibration(), AreaRate::per_square_foot(dec!(-4)), dec!(400), dec!(54)),
            Err(PricingError::InvalidWholesalePrice {
                component: PriceComponent::Mat,
                ..
            })
        ));
    }
}
