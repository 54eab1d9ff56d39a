//! # Pricing Engine
//!
//! End-to-end quote: geometry and catalog selections in, breakdown out.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. validate geometry and quantity                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. finish geometry: outer = artwork + 2 × mat border (if matted)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. resolve wholesale prices                                           │
//! │       ├── record has price      → use it                               │
//! │       ├── no price, UseDefault  → configured default, flag + warn      │
//! │       └── no price, Reject      → MissingWholesalePrice                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. price frame, mat, glass, backing; estimate labor                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. aggregate with tax (and overhead when authorized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds its configuration behind an `Arc`, so cloning it is
//! cheap and a single instance can serve concurrent requests.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::aggregate::{aggregate, ComponentPrices, PriceBreakdown};
use crate::config::{MissingPricePolicy, PricingConfig};
use crate::error::{PricingError, PricingResult};
use crate::labor::{estimate_labor, LaborEstimate, LaborSelection};
use crate::pricing::{self, ComponentPrice};
use crate::types::{
    AreaRate, FramePricingMethod, FrameRecord, Geometry, GlassRecord, GlassType, MatRecord,
    PriceComponent,
};
use crate::validation::{validate_geometry, validate_quantity};

// =============================================================================
// Request Types
// =============================================================================

/// Whether the caller may see wholesale costs and margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfitabilityAccess {
    /// Retail figures only.
    #[default]
    Withheld,
    /// Include wholesale costs and profitability.
    Authorized,
}

/// One framed piece (times `quantity`) to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub geometry: Geometry,

    #[serde(default)]
    pub frame: Option<FrameRecord>,

    #[serde(default)]
    pub mat: Option<MatRecord>,

    #[serde(default)]
    pub glass: Option<GlassRecord>,

    #[serde(default)]
    pub frame_method: FramePricingMethod,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default = "default_include_backing")]
    pub include_backing: bool,
}

fn default_quantity() -> i64 {
    1
}

fn default_include_backing() -> bool {
    true
}

impl QuoteRequest {
    /// A single piece with backing and nothing else selected.
    pub fn new(geometry: Geometry) -> Self {
        QuoteRequest {
            geometry,
            frame: None,
            mat: None,
            glass: None,
            frame_method: FramePricingMethod::default(),
            quantity: default_quantity(),
            include_backing: default_include_backing(),
        }
    }

    pub fn with_frame(mut self, frame: FrameRecord) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn with_mat(mut self, mat: MatRecord) -> Self {
        self.mat = Some(mat);
        self
    }

    pub fn with_glass(mut self, glass: GlassRecord) -> Self {
        self.glass = Some(glass);
        self
    }

    pub fn with_method(mut self, method: FramePricingMethod) -> Self {
        self.frame_method = method;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn without_backing(mut self) -> Self {
        self.include_backing = false;
        self
    }
}

// =============================================================================
// Engine
// =============================================================================

/// A validated configuration plus the operations that use it.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: Arc<PricingConfig>,
}

impl PricingEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: PricingConfig) -> PricingResult<Self> {
        config.validate()?;
        Ok(PricingEngine {
            config: Arc::new(config),
        })
    }

    /// An engine with the shipped calibration.
    pub fn with_defaults() -> Self {
        PricingEngine {
            config: Arc::new(PricingConfig::default()),
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Component operations
    // -------------------------------------------------------------------------

    pub fn price_frame(
        &self,
        wholesale_per_foot: Decimal,
        perimeter_feet: Decimal,
        method: FramePricingMethod,
    ) -> PricingResult<ComponentPrice> {
        pricing::price_frame(&self.config.frame, wholesale_per_foot, perimeter_feet, method)
    }

    pub fn price_mat(
        &self,
        wholesale: AreaRate,
        mat_area: Decimal,
        finished_united_inches: Decimal,
    ) -> PricingResult<ComponentPrice> {
        pricing::price_mat(&self.config.mat, wholesale, mat_area, finished_united_inches)
    }

    pub fn price_glass(
        &self,
        wholesale: AreaRate,
        area: Decimal,
        united_inches: Decimal,
        glass_type: GlassType,
    ) -> PricingResult<ComponentPrice> {
        pricing::price_glass(&self.config.glass, wholesale, area, united_inches, glass_type)
    }

    pub fn price_backing(&self, area: Decimal) -> PricingResult<ComponentPrice> {
        pricing::price_backing(&self.config.backing, area)
    }

    pub fn estimate_labor(
        &self,
        united_inches: Decimal,
        selection: LaborSelection,
    ) -> PricingResult<LaborEstimate> {
        estimate_labor(&self.config.labor, united_inches, selection)
    }

    // -------------------------------------------------------------------------
    // Quote
    // -------------------------------------------------------------------------

    /// Prices a full quote.
    ///
    /// ## Errors
    /// Any [`PricingError`]; a failed quote never yields a partial breakdown.
    ///
    /// ## Example
    /// ```rust
    /// use frameshop_core::engine::{PricingEngine, ProfitabilityAccess, QuoteRequest};
    /// use frameshop_core::types::{AreaUnit, Geometry, MatRecord};
    /// use rust_decimal_macros::dec;
    ///
    /// let engine = PricingEngine::with_defaults();
    /// let request = QuoteRequest::new(Geometry::new(dec!(20), dec!(16), dec!(3)))
    ///     .with_mat(MatRecord::new("MAT-ALPINE", None, AreaUnit::PerSquareFoot));
    ///
    /// let breakdown = engine.quote(&request, ProfitabilityAccess::Withheld).unwrap();
    /// assert!(breakdown.used_default_wholesale_price);
    /// ```
    pub fn quote(
        &self,
        request: &QuoteRequest,
        access: ProfitabilityAccess,
    ) -> PricingResult<PriceBreakdown> {
        validate_geometry(&request.geometry)?;
        validate_quantity(request.quantity)?;

        let finished = request.geometry.finish(request.mat.is_some());
        let united_inches = finished.united_inches();
        let outer_area = finished.outer_area();
        let mat_area = finished.mat_area();

        debug!(
            outer_width = %finished.outer_width,
            outer_height = %finished.outer_height,
            united_inches = %united_inches,
            "Finished geometry"
        );

        let mut components = ComponentPrices::default();
        let defaults = &self.config.defaults;

        if let Some(frame) = &request.frame {
            let price = self.resolve_price(
                PriceComponent::Frame,
                &frame.id,
                frame.price,
                defaults.frame_per_foot,
                &mut components.defaulted_components,
            )?;
            components.frame =
                self.price_frame(price, finished.perimeter_feet(), request.frame_method)?;
        }

        // A zero border leaves no board to buy or cut
        let visible_mat = request.mat.as_ref().filter(|_| mat_area > Decimal::ZERO);
        if let Some(mat) = visible_mat {
            let rate = self.resolve_price(
                PriceComponent::Mat,
                &mat.id,
                mat.wholesale_rate(),
                defaults.mat,
                &mut components.defaulted_components,
            )?;
            components.mat = self.price_mat(rate, mat_area, united_inches)?;
        }

        if let Some(glass) = &request.glass {
            let rate = self.resolve_price(
                PriceComponent::Glass,
                &glass.id,
                glass.wholesale_rate(),
                defaults.glass,
                &mut components.defaulted_components,
            )?;
            components.glass =
                self.price_glass(rate, outer_area, united_inches, glass.glass_type())?;
        }

        if request.include_backing {
            components.backing = self.price_backing(outer_area)?;
        }

        let selection = LaborSelection::new(
            request.frame.is_some(),
            visible_mat.is_some(),
            request.glass.is_some(),
        );
        let labor = self.estimate_labor(united_inches, selection)?;

        let overhead_rate = match access {
            ProfitabilityAccess::Authorized => Some(self.config.overhead_rate_bps),
            ProfitabilityAccess::Withheld => None,
        };

        aggregate(
            &components,
            &labor,
            request.quantity,
            self.config.tax_rate_bps,
            overhead_rate,
        )
    }

    /// Applies the missing-price policy to one selected item.
    fn resolve_price<T: Copy>(
        &self,
        component: PriceComponent,
        item_id: &str,
        price: Option<T>,
        default: T,
        defaulted: &mut Vec<PriceComponent>,
    ) -> PricingResult<T> {
        if let Some(price) = price {
            return Ok(price);
        }

        match self.config.missing_price_policy {
            MissingPricePolicy::UseDefault => {
                warn!(
                    component = %component,
                    item_id = %item_id,
                    "No wholesale price, using configured default"
                );
                defaulted.push(component);
                Ok(default)
            }
            MissingPricePolicy::Reject => Err(PricingError::MissingWholesalePrice {
                component,
                item_id: item_id.to_string(),
            }),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine::with_defaults()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::AreaUnit;
    use rust_decimal_macros::dec;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<PricingEngine>();
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = PricingConfig::default();
        config.frame.scale = dec!(-1);
        assert!(PricingEngine::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_backing_only_quote() {
        // 10 × 8 unframed: backing 80 × 0.01 × 3 = 2.40; labor 0.4 h = 18
        let engine = PricingEngine::with_defaults();
        let breakdown = engine
            .quote(
                &QuoteRequest::new(Geometry::new(dec!(10), dec!(8), dec!(2))),
                ProfitabilityAccess::Withheld,
            )
            .unwrap();
        assert_eq!(breakdown.backing, Money::from_cents(240));
        assert_eq!(breakdown.labor, Money::from_cents(1800));
        assert_eq!(breakdown.subtotal, Money::from_cents(2040));
        assert_eq!(breakdown.frame, Money::zero());
    }

    #[test]
    fn test_mat_border_only_counts_with_a_mat() {
        let engine = PricingEngine::with_defaults();
        let geometry = Geometry::new(dec!(20), dec!(16), dec!(5));
        let glass = GlassRecord::new("GL-1", "Regular", Some(dec!(0.02)));

        let unmatted = engine
            .quote(
                &QuoteRequest::new(geometry).with_glass(glass.clone()),
                ProfitabilityAccess::Withheld,
            )
            .unwrap();
        let matted = engine
            .quote(
                &QuoteRequest::new(geometry)
                    .with_glass(glass)
                    .with_mat(MatRecord::new("MAT-1", Some(dec!(4)), AreaUnit::PerSquareFoot)),
                ProfitabilityAccess::Withheld,
            )
            .unwrap();
        assert!(matted.glass > unmatted.glass);
        assert!(matted.backing > unmatted.backing);
    }

    #[test]
    fn test_missing_price_defaults_and_flags() {
        let engine = PricingEngine::with_defaults();
        let request = QuoteRequest::new(Geometry::new(dec!(20), dec!(16), dec!(3)))
            .with_frame(FrameRecord::unpriced("FR-9"))
            .with_mat(MatRecord::new("MAT-1", Some(dec!(4)), AreaUnit::PerSquareFoot));

        let breakdown = engine.quote(&request, ProfitabilityAccess::Withheld).unwrap();
        assert!(breakdown.used_default_wholesale_price);
        assert_eq!(breakdown.defaulted_components, vec![PriceComponent::Frame]);
        assert!(breakdown.frame.cents() > 0);
    }

    #[test]
    fn test_missing_price_rejected_by_policy() {
        let mut config = PricingConfig::default();
        config.missing_price_policy = MissingPricePolicy::Reject;
        let engine = PricingEngine::new(config).unwrap();

        let request = QuoteRequest::new(Geometry::new(dec!(20), dec!(16), dec!(0)))
            .with_glass(GlassRecord::new("GL-MUSEUM", "Museum", None));

        let err = engine.quote(&request, ProfitabilityAccess::Withheld).unwrap_err();
        assert_eq!(
            err,
            PricingError::MissingWholesalePrice {
                component: PriceComponent::Glass,
                item_id: "GL-MUSEUM".to_string(),
            }
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_geometry_and_quantity() {
        let engine = PricingEngine::with_defaults();
        let bad_width = QuoteRequest::new(Geometry::new(dec!(0), dec!(16), dec!(0)));
        assert!(matches!(
            engine.quote(&bad_width, ProfitabilityAccess::Withheld),
            Err(PricingError::InvalidGeometry { .. })
        ));

        let bad_quantity = QuoteRequest::new(Geometry::new(dec!(10), dec!(16), dec!(0))).with_quantity(0);
        assert!(matches!(
            engine.quote(&bad_quantity, ProfitabilityAccess::Withheld),
            Err(PricingError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_oversized_inputs_are_errors_not_panics() {
        let engine = PricingEngine::with_defaults();

        let huge = QuoteRequest::new(Geometry::new(dec!(1e15), dec!(1e15), dec!(0)));
        assert!(matches!(
            engine.quote(&huge, ProfitabilityAccess::Withheld),
            Err(PricingError::InvalidGeometry { .. })
        ));

        let pricey = QuoteRequest::new(Geometry::new(dec!(10), dec!(8), dec!(0)))
            .with_frame(FrameRecord::priced("X", dec!(1e27)));
        assert!(matches!(
            engine.quote(&pricey, ProfitabilityAccess::Withheld),
            Err(PricingError::InvalidWholesalePrice {
                component: PriceComponent::Frame,
                ..
            })
        ));

        // largest accepted inputs still price
        let largest = QuoteRequest::new(Geometry::new(dec!(10000), dec!(10000), dec!(10000)))
            .with_frame(FrameRecord::priced("FR-MAX", dec!(1000000)))
            .with_mat(MatRecord::new("MAT-MAX", Some(dec!(1000000)), AreaUnit::PerSquareInch))
            .with_glass(GlassRecord::new("GL-MAX", "Museum", Some(dec!(1000000))));
        assert!(engine.quote(&largest, ProfitabilityAccess::Authorized).is_ok());

        let overflowing = largest.with_quantity(i64::MAX);
        assert!(matches!(
            engine.quote(&overflowing, ProfitabilityAccess::Withheld),
            Err(PricingError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_border_mat_has_no_side_effects() {
        let engine = PricingEngine::with_defaults();
        let geometry = Geometry::new(dec!(20), dec!(16), dec!(0));

        let bare = engine
            .quote(&QuoteRequest::new(geometry), ProfitabilityAccess::Withheld)
            .unwrap();
        let flush_mat = engine
            .quote(
                &QuoteRequest::new(geometry)
                    .with_mat(MatRecord::new("MAT-1", None, AreaUnit::PerSquareFoot)),
                ProfitabilityAccess::Withheld,
            )
            .unwrap();

        assert_eq!(flush_mat.mat, Money::zero());
        assert!(!flush_mat.used_default_wholesale_price);
        assert!(flush_mat.defaulted_components.is_empty());
        assert_eq!(flush_mat.labor_hours, bare.labor_hours);
        assert_eq!(flush_mat, bare);
    }

    #[test]
    fn test_profitability_only_when_authorized() {
        let engine = PricingEngine::with_defaults();
        let request = QuoteRequest::new(Geometry::new(dec!(16), dec!(20), dec!(0)))
            .with_frame(FrameRecord::priced("FR-1", dec!(4.25)));

        let withheld = engine.quote(&request, ProfitabilityAccess::Withheld).unwrap();
        let authorized = engine.quote(&request, ProfitabilityAccess::Authorized).unwrap();
        assert!(!withheld.has_cost_data());
        assert!(authorized.has_cost_data());
        assert_eq!(authorized.clone().redacted(), withheld);
    }

    #[test]
    fn test_request_json_defaults() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{ "geometry": { "artworkWidth": "11", "artworkHeight": "14" } }"#,
        )
        .unwrap();
        assert_eq!(request.quantity, 1);
        assert!(request.include_backing);
        assert_eq!(request.frame_method, FramePricingMethod::Chop);
        assert_eq!(request.geometry.mat_width, dec!(0));
    }
}
