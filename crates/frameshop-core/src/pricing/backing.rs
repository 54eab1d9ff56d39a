//! Backing board pricer. Flat rate, no tiers.

use rust_decimal::Decimal;
use tracing::debug;

use super::ComponentPrice;
use crate::config::BackingCalibration;
use crate::error::PricingResult;
use crate::money::checked_product;

/// Prices foam-core backing over the outer area.
///
/// `retail = wholesale_per_square_inch × area × markup`; an empty area
/// costs nothing.
pub fn price_backing(calibration: &BackingCalibration, area: Decimal) -> PricingResult<ComponentPrice> {
    if area <= Decimal::ZERO {
        return Ok(ComponentPrice::ZERO);
    }

    let cost = checked_product(&[calibration.wholesale_per_square_inch, area])?;
    let retail = checked_product(&[cost, calibration.markup])?;

    debug!(area = %area, retail = %retail, "Priced backing");

    Ok(ComponentPrice::new(retail, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flat_rate() {
        let price = price_backing(&BackingCalibration::default(), dec!(720)).unwrap();
        assert_eq!(price.wholesale, dec!(7.20));
        assert_eq!(price.retail, dec!(21.60));
    }

    #[test]
    fn test_empty_area() {
        assert_eq!(
            price_backing(&BackingCalibration::default(), dec!(-5)).unwrap(),
            ComponentPrice::ZERO
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut calibration = BackingCalibration::default();
        calibration.markup = dec!(1e22);
        assert!(price_backing(&calibration, dec!(1e10)).is_err());
    }
}
