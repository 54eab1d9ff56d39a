//! # Labor Estimator
//!
//! Shop time for a framing job, converted to cost.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation        Hours                          Included when         │
//! │  ───────────────  ─────────────────────────────  ───────────────────   │
//! │  Frame assembly   0.004 × united inches          frame selected        │
//! │  Mat cutting      0.003 × united inches          mat selected          │
//! │  Glass cutting    0.002 × united inches          glass selected        │
//! │  Fitting          0.25                           always                │
//! │  Finishing        0.15                           always                │
//! │                                                                         │
//! │  cost = total_hours × base_hourly_rate × regional_factor               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every coefficient lives in [`LaborCalibration`]; the table above shows the
//! defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::LaborCalibration;
use crate::error::{PricingError, PricingResult};
use crate::money::{checked_product, checked_sum};
use crate::validation::validate_factor;

// =============================================================================
// Types
// =============================================================================

/// Which components the job includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaborSelection {
    pub has_frame: bool,
    pub has_mat: bool,
    pub has_glass: bool,
}

impl LaborSelection {
    pub const fn new(has_frame: bool, has_mat: bool, has_glass: bool) -> Self {
        LaborSelection {
            has_frame,
            has_mat,
            has_glass,
        }
    }
}

/// Estimated hours per operation and the resulting labor cost.
///
/// Hours and cost are exact decimals; the aggregator rounds the cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LaborEstimate {
    #[ts(type = "string")]
    pub frame_assembly_hours: Decimal,
    #[ts(type = "string")]
    pub mat_cutting_hours: Decimal,
    #[ts(type = "string")]
    pub glass_cutting_hours: Decimal,
    #[ts(type = "string")]
    pub fitting_hours: Decimal,
    #[ts(type = "string")]
    pub finishing_hours: Decimal,
    #[ts(type = "string")]
    pub total_hours: Decimal,
    /// Base rate × regional factor.
    #[ts(type = "string")]
    pub effective_hourly_rate: Decimal,
    #[ts(type = "string")]
    pub cost: Decimal,
}

// =============================================================================
// Estimation
// =============================================================================

/// Estimates labor with the configured hourly rate and regional factor.
///
/// ## Example
/// ```rust
/// use frameshop_core::config::LaborCalibration;
/// use frameshop_core::labor::{estimate_labor, LaborSelection};
/// use rust_decimal_macros::dec;
///
/// let estimate = estimate_labor(
///     &LaborCalibration::default(),
///     dec!(50),
///     LaborSelection::new(true, false, false),
/// )
/// .unwrap();
///
/// // 0.004 × 50 + 0.25 + 0.15 = 0.6 h at $45
/// assert_eq!(estimate.total_hours, dec!(0.6));
/// assert_eq!(estimate.cost, dec!(27.00));
/// ```
pub fn estimate_labor(
    calibration: &LaborCalibration,
    united_inches: Decimal,
    selection: LaborSelection,
) -> PricingResult<LaborEstimate> {
    estimate_labor_with(
        calibration,
        united_inches,
        selection,
        calibration.base_hourly_rate,
        calibration.regional_factor,
    )
}

/// Estimates labor with an explicit hourly rate and regional factor, for
/// callers pricing a job for another location.
///
/// ## Errors
/// - `InvalidGeometry` when `united_inches ≤ 0`
/// - `InvalidRate` when the rate or factor is negative
/// - `AmountOutOfRange` when hours or cost overflow
pub fn estimate_labor_with(
    calibration: &LaborCalibration,
    united_inches: Decimal,
    selection: LaborSelection,
    base_hourly_rate: Decimal,
    regional_factor: Decimal,
) -> PricingResult<LaborEstimate> {
    if united_inches <= Decimal::ZERO {
        return Err(PricingError::geometry("united_inches", united_inches));
    }
    validate_factor("base_hourly_rate", base_hourly_rate)?;
    validate_factor("regional_factor", regional_factor)?;

    let sized = |enabled: bool, per_inch: Decimal| {
        if enabled {
            checked_product(&[per_inch, united_inches])
        } else {
            Ok(Decimal::ZERO)
        }
    };

    let frame_assembly_hours = sized(selection.has_frame, calibration.frame_assembly_hours_per_inch)?;
    let mat_cutting_hours = sized(selection.has_mat, calibration.mat_cutting_hours_per_inch)?;
    let glass_cutting_hours = sized(selection.has_glass, calibration.glass_cutting_hours_per_inch)?;

    let total_hours = checked_sum(&[
        frame_assembly_hours,
        mat_cutting_hours,
        glass_cutting_hours,
        calibration.fitting_hours,
        calibration.finishing_hours,
    ])?;
    let effective_hourly_rate = checked_product(&[base_hourly_rate, regional_factor])?;
    let cost = checked_product(&[total_hours, effective_hourly_rate])?;

    debug!(
        united_inches = %united_inches,
        total_hours = %total_hours,
        hourly_rate = %effective_hourly_rate,
        cost = %cost,
        "Estimated labor"
    );

    Ok(LaborEstimate {
        frame_assembly_hours,
        mat_cutting_hours,
        glass_cutting_hours,
        fitting_hours: calibration.fitting_hours,
        finishing_hours: calibration.finishing_hours,
        total_hours,
        effective_hourly_rate,
        cost,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
