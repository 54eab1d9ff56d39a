//! # Pricing Configuration
//!
//! Every calibration value the engine uses, gathered in one immutable value
//! that is passed into the pricers.
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml (loaded by frameshop-config)
//! tax_rate_bps = 800
//! overhead_rate_bps = 3000
//! missing_price_policy = "use_default"
//!
//! [frame]
//! minimum_billable_feet = "4"
//! scale = "1"
//!
//! [labor]
//! base_hourly_rate = "45"
//! regional_factor = "1.15"
//!
//! [mat.markup]
//! name = "mat"
//! step = "1"
//! [[mat.markup.tiers]]
//! range_low = "0"
//! range_high = "32"
//! multiplier = "3.00"
//! minimum_charge = "20.00"
//! ```
//!
//! Every field has a default, so a file only needs the values it changes.
//!
//! ## Calibration Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frame    wholesale $/ft × method factor × max(perimeter, 4 ft)        │
//! │           × tier multiplier (keyed by $/ft) × scale (1.00)             │
//! │  Mat      $/sq-in × mat area × tier multiplier (keyed by finished UI)  │
//! │           × 1.25 board offcut allowance, floored at tier minimum       │
//! │  Glass    base charge ($8 ≤ 40 UI, $15 above) + sq-ft × $/sq-ft        │
//! │           × tier multiplier × grade (1.0 / 1.5 / 2.5) × 1.10 breakage  │
//! │  Backing  $0.01/sq-in × outer area × 3.0                               │
//! │  Labor    hours × $45/h × regional factor (1.00)                       │
//! │  Tax      8.00%        Overhead 30.00% of wholesale                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingResult;
use crate::markup::{Charge, ChargeTable, Markup, MarkupTable, Tier};
use crate::types::{AreaRate, FramePricingMethod, GlassType, Rate};
use crate::validation::{validate_factor, validate_rate};

// =============================================================================
// Missing Price Policy
// =============================================================================

/// What to do when a selected catalog item has no wholesale price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPricePolicy {
    /// Substitute the configured default and flag the breakdown.
    #[default]
    UseDefault,
    /// Fail with `MissingWholesalePrice`.
    Reject,
}

impl std::fmt::Display for MissingPricePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingPricePolicy::UseDefault => write!(f, "use_default"),
            MissingPricePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for MissingPricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "use_default" | "default" => Ok(MissingPricePolicy::UseDefault),
            "reject" | "strict" => Ok(MissingPricePolicy::Reject),
            other => Err(format!(
                "Unknown missing price policy: '{}'. Valid options: use_default, reject",
                other
            )),
        }
    }
}

// =============================================================================
// Frame Calibration
// =============================================================================

/// Frame moulding pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCalibration {
    /// Shorter frames are billed as this many feet.
    #[serde(default = "default_minimum_billable_feet")]
    pub minimum_billable_feet: Decimal,

    /// Fixed scale applied to every frame retail price.
    #[serde(default = "default_one")]
    pub scale: Decimal,

    /// Wholesale factor for chopped moulding.
    #[serde(default = "default_one")]
    pub chop_factor: Decimal,

    /// Wholesale factor for length moulding (offcuts from full sticks).
    #[serde(default = "default_length_factor")]
    pub length_factor: Decimal,

    /// Wholesale factor for vendor-joined frames.
    #[serde(default = "default_join_factor")]
    pub join_factor: Decimal,

    /// Multiplier keyed by wholesale $/ft (step $0.01).
    #[serde(default = "default_frame_markup")]
    pub markup: MarkupTable,
}

impl FrameCalibration {
    /// The wholesale factor for a pricing method.
    pub fn method_factor(&self, method: FramePricingMethod) -> Decimal {
        match method {
            FramePricingMethod::Chop => self.chop_factor,
            FramePricingMethod::Length => self.length_factor,
            FramePricingMethod::Join => self.join_factor,
        }
    }

    fn validate(&self) -> PricingResult<()> {
        validate_factor("frame.minimum_billable_feet", self.minimum_billable_feet)?;
        validate_factor("frame.scale", self.scale)?;
        validate_factor("frame.chop_factor", self.chop_factor)?;
        validate_factor("frame.length_factor", self.length_factor)?;
        validate_factor("frame.join_factor", self.join_factor)
    }
}

impl Default for FrameCalibration {
    fn default() -> Self {
        FrameCalibration {
            minimum_billable_feet: default_minimum_billable_feet(),
            scale: default_one(),
            chop_factor: default_one(),
            length_factor: default_length_factor(),
            join_factor: default_join_factor(),
            markup: default_frame_markup(),
        }
    }
}

/// Frame markup keyed by wholesale $/ft, in cents.
///
/// Cheaper moulding carries a higher multiplier, so retail can step down
/// where wholesale crosses a tier edge: at 4 billed feet, $9.99/ft retails
/// for $99.90 while $10.00/ft retails for $90.00. Prices only rise with
/// wholesale cost within a tier.
fn default_frame_markup() -> MarkupTable {
    MarkupTable::builtin(
        "frame",
        dec!(0.01),
        vec![
            Tier::bounded(dec!(0.00), dec!(1.99), Markup::new(dec!(4.00))),
            Tier::bounded(dec!(2.00), dec!(3.99), Markup::new(dec!(3.50))),
            Tier::bounded(dec!(4.00), dec!(5.99), Markup::new(dec!(3.00))),
            Tier::bounded(dec!(6.00), dec!(7.99), Markup::new(dec!(2.75))),
            Tier::bounded(dec!(8.00), dec!(9.99), Markup::new(dec!(2.50))),
            Tier::unbounded(dec!(10.00), Markup::new(dec!(2.25))),
        ],
    )
}

fn default_minimum_billable_feet() -> Decimal {
    dec!(4)
}

fn default_length_factor() -> Decimal {
    dec!(1.15)
}

fn default_join_factor() -> Decimal {
    dec!(1.10)
}

fn default_one() -> Decimal {
    Decimal::ONE
}

// =============================================================================
// Mat Calibration
// =============================================================================

/// Mat board pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatCalibration {
    /// Board offcut allowance.
    #[serde(default = "default_mat_scale")]
    pub scale: Decimal,

    /// Multiplier and minimum keyed by finished united inches.
    #[serde(default = "default_mat_markup")]
    pub markup: MarkupTable,
}

impl MatCalibration {
    fn validate(&self) -> PricingResult<()> {
        validate_factor("mat.scale", self.scale)
    }
}

impl Default for MatCalibration {
    fn default() -> Self {
        MatCalibration {
            scale: default_mat_scale(),
            markup: default_mat_markup(),
        }
    }
}

fn default_mat_markup() -> MarkupTable {
    MarkupTable::builtin(
        "mat",
        dec!(1),
        vec![
            Tier::bounded(dec!(0), dec!(32), Markup::with_minimum(dec!(3.00), dec!(20.00))),
            Tier::bounded(dec!(33), dec!(48), Markup::with_minimum(dec!(2.75), dec!(28.00))),
            Tier::bounded(dec!(49), dec!(60), Markup::with_minimum(dec!(2.50), dec!(35.00))),
            Tier::bounded(dec!(61), dec!(80), Markup::with_minimum(dec!(2.25), dec!(45.00))),
            Tier::bounded(dec!(81), dec!(100), Markup::with_minimum(dec!(2.00), dec!(60.00))),
            Tier::unbounded(dec!(101), Markup::with_minimum(dec!(1.85), dec!(80.00))),
        ],
    )
}

fn default_mat_scale() -> Decimal {
    dec!(1.25)
}

// =============================================================================
// Glass Calibration
// =============================================================================

/// Glazing pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassCalibration {
    #[serde(default = "default_one")]
    pub regular_multiplier: Decimal,

    #[serde(default = "default_conservation_multiplier")]
    pub conservation_multiplier: Decimal,

    #[serde(default = "default_museum_multiplier")]
    pub museum_multiplier: Decimal,

    /// Breakage allowance.
    #[serde(default = "default_glass_scale")]
    pub scale: Decimal,

    /// Multiplier keyed by united inches.
    #[serde(default = "default_glass_markup")]
    pub markup: MarkupTable,

    /// Handling charge keyed by united inches.
    #[serde(default = "default_glass_base_charge")]
    pub base_charge: ChargeTable,
}

impl GlassCalibration {
    /// The retail multiplier for a glass grade.
    pub fn type_multiplier(&self, glass_type: GlassType) -> Decimal {
        match glass_type {
            GlassType::Regular => self.regular_multiplier,
            GlassType::Conservation => self.conservation_multiplier,
            GlassType::Museum => self.museum_multiplier,
        }
    }

    fn validate(&self) -> PricingResult<()> {
        validate_factor("glass.regular_multiplier", self.regular_multiplier)?;
        validate_factor("glass.scale", self.scale)?;

        // conservation and museum both above regular, museum the highest
        if self.conservation_multiplier <= self.regular_multiplier {
            return Err(crate::PricingError::rate(
                "glass.conservation_multiplier",
                self.conservation_multiplier,
            ));
        }
        if self.museum_multiplier <= self.conservation_multiplier {
            return Err(crate::PricingError::rate(
                "glass.museum_multiplier",
                self.museum_multiplier,
            ));
        }
        Ok(())
    }
}

impl Default for GlassCalibration {
    fn default() -> Self {
        GlassCalibration {
            regular_multiplier: default_one(),
            conservation_multiplier: default_conservation_multiplier(),
            museum_multiplier: default_museum_multiplier(),
            scale: default_glass_scale(),
            markup: default_glass_markup(),
            base_charge: default_glass_base_charge(),
        }
    }
}

fn default_glass_markup() -> MarkupTable {
    MarkupTable::builtin(
        "glass",
        dec!(1),
        vec![
            Tier::bounded(dec!(0), dec!(40), Markup::new(dec!(2.50))),
            Tier::bounded(dec!(41), dec!(60), Markup::new(dec!(2.25))),
            Tier::bounded(dec!(61), dec!(80), Markup::new(dec!(2.00))),
            Tier::unbounded(dec!(81), Markup::new(dec!(1.80))),
        ],
    )
}

fn default_glass_base_charge() -> ChargeTable {
    ChargeTable::builtin(
        "glass_base_charge",
        dec!(1),
        vec![
            Tier::bounded(dec!(0), dec!(40), Charge { charge: dec!(8.00) }),
            Tier::unbounded(dec!(41), Charge { charge: dec!(15.00) }),
        ],
    )
}

fn default_conservation_multiplier() -> Decimal {
    dec!(1.5)
}

fn default_museum_multiplier() -> Decimal {
    dec!(2.5)
}

fn default_glass_scale() -> Decimal {
    dec!(1.10)
}

// =============================================================================
// Backing Calibration
// =============================================================================

/// Foam-core backing pricing. Flat rate, no tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingCalibration {
    /// Wholesale $/sq-in.
    #[serde(default = "default_backing_rate")]
    pub wholesale_per_square_inch: Decimal,

    #[serde(default = "default_backing_markup")]
    pub markup: Decimal,
}

impl BackingCalibration {
    fn validate(&self) -> PricingResult<()> {
        validate_factor("backing.wholesale_per_square_inch", self.wholesale_per_square_inch)?;
        validate_factor("backing.markup", self.markup)
    }
}

impl Default for BackingCalibration {
    fn default() -> Self {
        BackingCalibration {
            wholesale_per_square_inch: default_backing_rate(),
            markup: default_backing_markup(),
        }
    }
}

fn default_backing_rate() -> Decimal {
    dec!(0.01)
}

fn default_backing_markup() -> Decimal {
    dec!(3.0)
}

// =============================================================================
// Labor Calibration
// =============================================================================

/// Shop labor rates and per-operation time coefficients.
///
/// Size-dependent operations take `hours_per_inch × united inches`; fitting
/// and finishing take a fixed time on every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCalibration {
    #[serde(default = "default_base_hourly_rate")]
    pub base_hourly_rate: Decimal,

    /// Regional cost-of-labor multiplier.
    #[serde(default = "default_one")]
    pub regional_factor: Decimal,

    #[serde(default = "default_frame_assembly_hours")]
    pub frame_assembly_hours_per_inch: Decimal,

    #[serde(default = "default_mat_cutting_hours")]
    pub mat_cutting_hours_per_inch: Decimal,

    #[serde(default = "default_glass_cutting_hours")]
    pub glass_cutting_hours_per_inch: Decimal,

    #[serde(default = "default_fitting_hours")]
    pub fitting_hours: Decimal,

    #[serde(default = "default_finishing_hours")]
    pub finishing_hours: Decimal,
}

impl LaborCalibration {
    fn validate(&self) -> PricingResult<()> {
        validate_factor("labor.base_hourly_rate", self.base_hourly_rate)?;
        validate_factor("labor.regional_factor", self.regional_factor)?;
        validate_factor("labor.frame_assembly_hours_per_inch", self.frame_assembly_hours_per_inch)?;
        validate_factor("labor.mat_cutting_hours_per_inch", self.mat_cutting_hours_per_inch)?;
        validate_factor("labor.glass_cutting_hours_per_inch", self.glass_cutting_hours_per_inch)?;
        validate_factor("labor.fitting_hours", self.fitting_hours)?;
        validate_factor("labor.finishing_hours", self.finishing_hours)
    }
}

impl Default for LaborCalibration {
    fn default() -> Self {
        LaborCalibration {
            base_hourly_rate: default_base_hourly_rate(),
            regional_factor: default_one(),
            frame_assembly_hours_per_inch: default_frame_assembly_hours(),
            mat_cutting_hours_per_inch: default_mat_cutting_hours(),
            glass_cutting_hours_per_inch: default_glass_cutting_hours(),
            fitting_hours: default_fitting_hours(),
            finishing_hours: default_finishing_hours(),
        }
    }
}

fn default_base_hourly_rate() -> Decimal {
    dec!(45.00)
}

fn default_frame_assembly_hours() -> Decimal {
    dec!(0.004)
}

fn default_mat_cutting_hours() -> Decimal {
    dec!(0.003)
}

fn default_glass_cutting_hours() -> Decimal {
    dec!(0.002)
}

fn default_fitting_hours() -> Decimal {
    dec!(0.25)
}

fn default_finishing_hours() -> Decimal {
    dec!(0.15)
}

// =============================================================================
// Default Wholesale Prices
// =============================================================================

/// Prices substituted for catalog items that have none, under
/// [`MissingPricePolicy::UseDefault`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultWholesalePrices {
    /// $/ft.
    #[serde(default = "default_frame_price")]
    pub frame_per_foot: Decimal,

    #[serde(default = "default_mat_price")]
    pub mat: AreaRate,

    #[serde(default = "default_glass_price")]
    pub glass: AreaRate,
}

impl DefaultWholesalePrices {
    fn validate(&self) -> PricingResult<()> {
        validate_factor("defaults.frame_per_foot", self.frame_per_foot)?;
        validate_factor("defaults.mat", self.mat.amount)?;
        validate_factor("defaults.glass", self.glass.amount)
    }
}

impl Default for DefaultWholesalePrices {
    fn default() -> Self {
        DefaultWholesalePrices {
            frame_per_foot: default_frame_price(),
            mat: default_mat_price(),
            glass: default_glass_price(),
        }
    }
}

fn default_frame_price() -> Decimal {
    dec!(3.50)
}

fn default_mat_price() -> AreaRate {
    AreaRate::per_square_foot(dec!(4.00))
}

fn default_glass_price() -> AreaRate {
    AreaRate::per_square_inch(dec!(0.02))
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Complete pricing calibration.
///
/// Construct once (defaults, or loaded by `frameshop-config`), validate,
/// then hand to [`crate::engine::PricingEngine`]. Nothing mutates it after
/// that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Sales tax rate in basis points.
    #[serde(default = "default_tax_rate")]
    pub tax_rate_bps: Rate,

    /// Overhead as a fraction of wholesale cost (profitability only).
    #[serde(default = "default_overhead_rate")]
    pub overhead_rate_bps: Rate,

    #[serde(default)]
    pub missing_price_policy: MissingPricePolicy,

    #[serde(default)]
    pub frame: FrameCalibration,

    #[serde(default)]
    pub mat: MatCalibration,

    #[serde(default)]
    pub glass: GlassCalibration,

    #[serde(default)]
    pub backing: BackingCalibration,

    #[serde(default)]
    pub labor: LaborCalibration,

    #[serde(default)]
    pub defaults: DefaultWholesalePrices,
}

fn default_tax_rate() -> Rate {
    Rate::from_bps(800)
}

fn default_overhead_rate() -> Rate {
    Rate::from_bps(3000)
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate_bps: default_tax_rate(),
            overhead_rate_bps: default_overhead_rate(),
            missing_price_policy: MissingPricePolicy::default(),
            frame: FrameCalibration::default(),
            mat: MatCalibration::default(),
            glass: GlassCalibration::default(),
            backing: BackingCalibration::default(),
            labor: LaborCalibration::default(),
            defaults: DefaultWholesalePrices::default(),
        }
    }
}

impl PricingConfig {
    /// Validates rates and factors.
    ///
    /// Markup tables validate themselves when built or deserialized.
    pub fn validate(&self) -> PricingResult<()> {
        validate_rate("tax_rate_bps", self.tax_rate_bps)?;
        validate_rate("overhead_rate_bps", self.overhead_rate_bps)?;
        self.frame.validate()?;
        self.mat.validate()?;
        self.glass.validate()?;
        self.backing.validate()?;
        self.labor.validate()?;
        self.defaults.validate()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::TierTable;
    use crate::PricingError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builtin_tables_pass_construction_checks() {
        let config = PricingConfig::default();
        for table in [&config.frame.markup, &config.mat.markup, &config.glass.markup] {
            let rebuilt = TierTable::new(table.name(), table.step(), table.tiers().to_vec());
            assert!(rebuilt.is_ok(), "{} table failed validation", table.name());
        }
        let base = &config.glass.base_charge;
        assert!(TierTable::new(base.name(), base.step(), base.tiers().to_vec()).is_ok());
    }

    #[test]
    fn test_mat_tiers_all_have_minimums() {
        let config = PricingConfig::default();
        assert!(config
            .mat
            .markup
            .tiers()
            .iter()
            .all(|tier| tier.value.minimum_charge.is_some()));
    }

    #[test]
    fn test_frame_retail_steps_down_at_tier_edge() {
        use crate::pricing::price_frame;
        use crate::types::FramePricingMethod;

        let frame = FrameCalibration::default();
        let below = price_frame(&frame, dec!(9.99), dec!(4), FramePricingMethod::Chop).unwrap();
        let at_edge = price_frame(&frame, dec!(10.00), dec!(4), FramePricingMethod::Chop).unwrap();
        assert_eq!(below.retail, dec!(99.90));
        assert_eq!(at_edge.retail, dec!(90.00));

        let inside = price_frame(&frame, dec!(10.01), dec!(4), FramePricingMethod::Chop).unwrap();
        assert!(inside.retail > at_edge.retail);
    }

    #[test]
    fn test_method_factors() {
        let frame = FrameCalibration::default();
        assert_eq!(frame.method_factor(FramePricingMethod::Chop), dec!(1));
        assert_eq!(frame.method_factor(FramePricingMethod::Length), dec!(1.15));
        assert_eq!(frame.method_factor(FramePricingMethod::Join), dec!(1.10));
    }

    #[test]
    fn test_glass_multiplier_ordering_enforced() {
        let mut config = PricingConfig::default();
        assert!(config.glass.type_multiplier(GlassType::Museum)
            > config.glass.type_multiplier(GlassType::Conservation));

        config.glass.museum_multiplier = dec!(1.2);
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_rate_limits_enforced() {
        let mut config = PricingConfig::default();
        config.tax_rate_bps = Rate::from_bps(12000);
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.labor.regional_factor = dec!(-1);
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "reject".parse::<MissingPricePolicy>().unwrap(),
            MissingPricePolicy::Reject
        );
        assert_eq!(
            "USE_DEFAULT".parse::<MissingPricePolicy>().unwrap(),
            MissingPricePolicy::UseDefault
        );
        assert!("ignore".parse::<MissingPricePolicy>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PricingConfig =
            serde_json::from_str(r#"{ "tax_rate_bps": 825, "labor": { "regional_factor": "1.2" } }"#)
                .unwrap();
        assert_eq!(config.tax_rate_bps, Rate::from_bps(825));
        assert_eq!(config.labor.regional_factor, dec!(1.2));
        assert_eq!(config.labor.base_hourly_rate, dec!(45));
        assert_eq!(config.mat, MatCalibration::default());
    }
}
