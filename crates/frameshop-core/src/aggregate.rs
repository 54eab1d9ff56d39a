//! # Price Aggregator
//!
//! Combines component prices and labor into the final breakdown.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  material    = frame + mat + glass + backing                           │
//! │  subtotal    = material + labor                                        │
//! │  tax         = subtotal × tax_rate                                     │
//! │  total       = subtotal + tax                       (per unit)         │
//! │  grand_total = total × quantity                                        │
//! │                                                                         │
//! │  Every line is computed from the exact decimals and rounded to cents   │
//! │  on its own, so the displayed components may differ from the subtotal  │
//! │  by a cent. The subtotal is authoritative.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Profitability
//! Wholesale costs and margins are only computed when the caller passes an
//! overhead rate, which [`crate::engine::PricingEngine`] does for
//! [`ProfitabilityAccess::Authorized`](crate::engine::ProfitabilityAccess)
//! requests. [`PriceBreakdown::redacted`] strips them again before a response
//! leaves a privileged context.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::labor::LaborEstimate;
use crate::money::{checked_product, checked_ratio, checked_sum, Money};
use crate::pricing::ComponentPrice;
use crate::types::{PriceComponent, Rate};
use crate::validation::{validate_quantity, validate_rate};

/// Decimal places kept for ratios (margin, markup multiplier).
const RATIO_SCALE: u32 = 4;

// =============================================================================
// Inputs
// =============================================================================

/// The four material components of one framed piece.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentPrices {
    pub frame: ComponentPrice,
    pub mat: ComponentPrice,
    pub glass: ComponentPrice,
    pub backing: ComponentPrice,
    /// Components priced with a substituted default wholesale price.
    pub defaulted_components: Vec<PriceComponent>,
}

impl ComponentPrices {
    fn retail(&self) -> PricingResult<Decimal> {
        checked_sum(&[
            self.frame.retail,
            self.mat.retail,
            self.glass.retail,
            self.backing.retail,
        ])
    }

    fn wholesale(&self) -> PricingResult<Decimal> {
        checked_sum(&[
            self.frame.wholesale,
            self.mat.wholesale,
            self.glass.wholesale,
            self.backing.wholesale,
        ])
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Wholesale material cost per component, per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleCosts {
    pub frame: Money,
    pub mat: Money,
    pub glass: Money,
    pub backing: Money,
    pub total: Money,
}

/// Margin figures for privileged callers, per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Profitability {
    pub wholesale_cost: Money,
    pub overhead_cost: Money,
    pub gross_profit: Money,
    /// gross_profit / subtotal, 4 dp. Zero when the subtotal is zero.
    #[ts(type = "string")]
    pub gross_margin: Decimal,
    /// subtotal / wholesale, 4 dp. Absent when nothing was bought wholesale.
    #[ts(type = "string | null")]
    pub markup_multiplier: Option<Decimal>,
}

/// The priced result of one quote.
///
/// Amounts other than `grand_total` are per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub frame: Money,
    pub mat: Money,
    pub glass: Money,
    pub backing: Money,
    pub material_cost: Money,
    pub labor: Money,
    #[ts(type = "string")]
    pub labor_hours: Decimal,
    pub subtotal: Money,
    pub tax_rate: Rate,
    pub tax: Money,
    pub total: Money,
    pub quantity: i64,
    pub grand_total: Money,
    pub used_default_wholesale_price: bool,
    pub defaulted_components: Vec<PriceComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale: Option<WholesaleCosts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profitability: Option<Profitability>,
}

impl PriceBreakdown {
    /// Drops wholesale and profitability data.
    pub fn redacted(mut self) -> Self {
        self.wholesale = None;
        self.profitability = None;
        self
    }

    /// True when wholesale or profitability data is present.
    pub fn has_cost_data(&self) -> bool {
        self.wholesale.is_some() || self.profitability.is_some()
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Builds the breakdown for `quantity` identical pieces.
///
/// `overhead_rate` is `Some` only for callers allowed to see costs.
///
/// ## Errors
/// - `InvalidQuantity` when `quantity` is not positive
/// - `InvalidRate` when a rate exceeds 100%
/// - `AmountOutOfRange` when an amount overflows or does not fit in cents
///
/// ## Example
/// ```rust
/// use frameshop_core::aggregate::{aggregate, ComponentPrices};
/// use frameshop_core::config::LaborCalibration;
/// use frameshop_core::labor::{estimate_labor, LaborSelection};
/// use frameshop_core::pricing::ComponentPrice;
/// use frameshop_core::types::Rate;
/// use rust_decimal_macros::dec;
///
/// let components = ComponentPrices {
///     frame: ComponentPrice::new(dec!(90), dec!(30)),
///     ..Default::default()
/// };
/// let labor = estimate_labor(&LaborCalibration::default(), dec!(20), LaborSelection::default()).unwrap();
///
/// let breakdown = aggregate(&components, &labor, 2, Rate::from_bps(800), None).unwrap();
/// assert_eq!(breakdown.subtotal.to_string(), "$108.00");
/// assert_eq!(breakdown.total.to_string(), "$116.64");
/// assert_eq!(breakdown.grand_total.to_string(), "$233.28");
/// assert!(breakdown.profitability.is_none());
/// ```
pub fn aggregate(
    components: &ComponentPrices,
    labor: &LaborEstimate,
    quantity: i64,
    tax_rate: Rate,
    overhead_rate: Option<Rate>,
) -> PricingResult<PriceBreakdown> {
    validate_quantity(quantity)?;
    validate_rate("tax_rate_bps", tax_rate)?;
    if let Some(rate) = overhead_rate {
        validate_rate("overhead_rate_bps", rate)?;
    }

    let material = components.retail()?;
    let subtotal = checked_sum(&[material, labor.cost])?;
    let tax = checked_product(&[subtotal, tax_rate.as_decimal()])?;
    let total = checked_sum(&[subtotal, tax])?;
    let grand_total = checked_product(&[total, Decimal::from(quantity)])?;

    let (wholesale, profitability) = match overhead_rate {
        Some(rate) => {
            let (costs, summary) = profitability(components, labor, subtotal, rate)?;
            (Some(costs), Some(summary))
        }
        None => (None, None),
    };

    let breakdown = PriceBreakdown {
        frame: to_money(components.frame.retail)?,
        mat: to_money(components.mat.retail)?,
        glass: to_money(components.glass.retail)?,
        backing: to_money(components.backing.retail)?,
        material_cost: to_money(material)?,
        labor: to_money(labor.cost)?,
        labor_hours: labor.total_hours,
        subtotal: to_money(subtotal)?,
        tax_rate,
        tax: to_money(tax)?,
        total: to_money(total)?,
        quantity,
        grand_total: to_money(grand_total)?,
        used_default_wholesale_price: !components.defaulted_components.is_empty(),
        defaulted_components: components.defaulted_components.clone(),
        wholesale,
        profitability,
    };

    debug!(
        subtotal = %breakdown.subtotal,
        tax = %breakdown.tax,
        total = %breakdown.total,
        quantity,
        grand_total = %breakdown.grand_total,
        "Aggregated price breakdown"
    );

    Ok(breakdown)
}

fn profitability(
    components: &ComponentPrices,
    labor: &LaborEstimate,
    subtotal: Decimal,
    overhead_rate: Rate,
) -> PricingResult<(WholesaleCosts, Profitability)> {
    let wholesale = components.wholesale()?;
    let overhead = checked_product(&[wholesale, overhead_rate.as_decimal()])?;
    let costs_total = checked_sum(&[wholesale, overhead, labor.cost])?;
    let gross_profit = checked_sum(&[subtotal, -costs_total])?;

    let gross_margin = if subtotal.is_zero() {
        Decimal::ZERO
    } else {
        ratio(checked_ratio(gross_profit, subtotal)?)
    };
    let markup_multiplier = if wholesale.is_zero() {
        None
    } else {
        Some(ratio(checked_ratio(subtotal, wholesale)?))
    };

    let costs = WholesaleCosts {
        frame: to_money(components.frame.wholesale)?,
        mat: to_money(components.mat.wholesale)?,
        glass: to_money(components.glass.wholesale)?,
        backing: to_money(components.backing.wholesale)?,
        total: to_money(wholesale)?,
    };
    let summary = Profitability {
        wholesale_cost: to_money(wholesale)?,
        overhead_cost: to_money(overhead)?,
        gross_profit: to_money(gross_profit)?,
        gross_margin,
        markup_multiplier,
    };
    Ok((costs, summary))
}

fn ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn to_money(value: Decimal) -> PricingResult<Money> {
    Money::from_decimal(value).ok_or(PricingError::AmountOutOfRange { value })
}

// =============================================================================
// Unit Tests
// =============================================================================
