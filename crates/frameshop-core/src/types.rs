//! # Domain Types
//!
//! Inputs the pricing engine consumes and the small value types shared by
//! every pricer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  FrameRecord    │   │   MatRecord     │   │  GlassRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  price ($/ft)   │   │  price          │   │  price ($/sqin) │       │
//! │  │  material       │   │  price_unit     │   │  name → type    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Geometry      │   │   AreaRate      │   │     Rate        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  artwork w × h  │   │  amount         │   │  bps (u32)      │       │
//! │  │  mat_width      │   │  unit (in²/ft²) │   │  800 = 8.00%    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog records are snapshots handed in by the storage layer. A `price`
//! of `None` means the catalog has no wholesale price for that item; the
//! engine never reads it as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::PricingResult;
use crate::money::{checked_product, checked_ratio};
use crate::{INCHES_PER_FOOT, SQUARE_INCHES_PER_SQUARE_FOOT};

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// Used for the sales tax rate and the overhead rate.
/// 1 basis point = 0.01%, so 800 bps = 8.00%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (800 bps → 0.08).
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (800 bps → 8.00).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Area Pricing Units
// =============================================================================

/// The area unit a wholesale price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    /// Dollars per square inch.
    PerSquareInch,
    /// Dollars per square foot (how mat board is usually listed).
    #[default]
    PerSquareFoot,
}

/// A wholesale price per unit of area, tagged with its unit.
///
/// Mat and glass pricers take this instead of a bare number, so a $/sq-ft
/// price can never be multiplied by square inches.
///
/// ## Example
/// ```rust
/// use frameshop_core::types::AreaRate;
/// use rust_decimal_macros::dec;
///
/// let board = AreaRate::per_square_foot(dec!(4.32));
/// assert_eq!(board.price_per_square_inch(), dec!(0.03));
/// assert_eq!(board.price_per_square_foot(), dec!(4.32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AreaRate {
    /// Wholesale amount per `unit`.
    #[ts(type = "string")]
    pub amount: Decimal,
    /// Unit the amount is quoted in.
    pub unit: AreaUnit,
}

impl AreaRate {
    /// A price quoted per square inch.
    pub const fn per_square_inch(amount: Decimal) -> Self {
        AreaRate {
            amount,
            unit: AreaUnit::PerSquareInch,
        }
    }

    /// A price quoted per square foot.
    pub const fn per_square_foot(amount: Decimal) -> Self {
        AreaRate {
            amount,
            unit: AreaUnit::PerSquareFoot,
        }
    }

    /// The price per square inch (÷144 when quoted per square foot).
    pub fn price_per_square_inch(&self) -> Decimal {
        match self.unit {
            AreaUnit::PerSquareInch => self.amount,
            AreaUnit::PerSquareFoot => {
                self.amount / Decimal::from(SQUARE_INCHES_PER_SQUARE_FOOT)
            }
        }
    }

    /// The price per square foot (×144 when quoted per square inch).
    pub fn price_per_square_foot(&self) -> Decimal {
        match self.unit {
            AreaUnit::PerSquareInch => {
                self.amount * Decimal::from(SQUARE_INCHES_PER_SQUARE_FOOT)
            }
            AreaUnit::PerSquareFoot => self.amount,
        }
    }

    /// Cost of `area` square inches.
    ///
    /// Multiplies before converting units, so a $/sq-ft price over a whole
    /// number of square feet stays exact.
    ///
    /// ## Errors
    /// `AmountOutOfRange` when the product overflows.
    pub fn cost_of(&self, area: Decimal) -> PricingResult<Decimal> {
        let cost = checked_product(&[self.amount, area])?;
        match self.unit {
            AreaUnit::PerSquareInch => Ok(cost),
            AreaUnit::PerSquareFoot => {
                checked_ratio(cost, Decimal::from(SQUARE_INCHES_PER_SQUARE_FOOT))
            }
        }
    }
}

// =============================================================================
// Glass Type
// =============================================================================

/// Glazing grade. Each grade carries its own retail multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GlassType {
    /// Standard clear glass.
    #[default]
    Regular,
    /// UV-filtering conservation glass.
    Conservation,
    /// Anti-reflective, UV-filtering museum glass.
    Museum,
}

impl GlassType {
    /// Infers the glass grade from a catalog product name.
    ///
    /// Case-insensitive substring match, checked in order:
    /// "museum" or "uv" → Museum, "conservation" or "clear" → Conservation,
    /// anything else → Regular.
    ///
    /// ## Example
    /// ```rust
    /// use frameshop_core::types::GlassType;
    ///
    /// assert_eq!(GlassType::infer("Museum Glass 2.5mm"), GlassType::Museum);
    /// assert_eq!(GlassType::infer("Conservation Clear"), GlassType::Conservation);
    /// assert_eq!(GlassType::infer("Premium Regular"), GlassType::Regular);
    /// ```
    pub fn infer(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("museum") || name.contains("uv") {
            GlassType::Museum
        } else if name.contains("conservation") || name.contains("clear") {
            GlassType::Conservation
        } else {
            GlassType::Regular
        }
    }
}

impl fmt::Display for GlassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlassType::Regular => write!(f, "regular"),
            GlassType::Conservation => write!(f, "conservation"),
            GlassType::Museum => write!(f, "museum"),
        }
    }
}

// =============================================================================
// Frame Pricing Method
// =============================================================================

/// How the moulding is bought from the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FramePricingMethod {
    /// Vendor cuts the four sides to size.
    #[default]
    Chop,
    /// Full sticks bought by the length and cut in-house.
    Length,
    /// Vendor cuts and joins the frame.
    Join,
}

impl fmt::Display for FramePricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramePricingMethod::Chop => write!(f, "chop"),
            FramePricingMethod::Length => write!(f, "length"),
            FramePricingMethod::Join => write!(f, "join"),
        }
    }
}

impl std::str::FromStr for FramePricingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chop" => Ok(FramePricingMethod::Chop),
            "length" => Ok(FramePricingMethod::Length),
            "join" => Ok(FramePricingMethod::Join),
            other => Err(format!(
                "Unknown pricing method: '{}'. Valid options: chop, length, join",
                other
            )),
        }
    }
}

// =============================================================================
// Price Component
// =============================================================================

/// One line of a price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceComponent {
    Frame,
    Mat,
    Glass,
    Backing,
    Labor,
}

impl fmt::Display for PriceComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceComponent::Frame => write!(f, "frame"),
            PriceComponent::Mat => write!(f, "mat"),
            PriceComponent::Glass => write!(f, "glass"),
            PriceComponent::Backing => write!(f, "backing"),
            PriceComponent::Labor => write!(f, "labor"),
        }
    }
}

// =============================================================================
// Catalog Records
// =============================================================================

/// A moulding selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    /// Catalog item number.
    pub id: String,

    /// Wholesale price per linear foot.
    #[ts(type = "string | null")]
    pub price: Option<Decimal>,

    /// Moulding material (wood, metal, ...). Informational.
    #[serde(default)]
    pub material: Option<String>,

    /// Moulding manufacturer. Informational.
    #[serde(default)]
    pub manufacturer: Option<String>,
}

impl FrameRecord {
    /// A moulding with a known wholesale price per foot.
    pub fn priced(id: impl Into<String>, price_per_foot: Decimal) -> Self {
        FrameRecord {
            id: id.into(),
            price: Some(price_per_foot),
            material: None,
            manufacturer: None,
        }
    }

    /// A moulding the catalog has no wholesale price for.
    pub fn unpriced(id: impl Into<String>) -> Self {
        FrameRecord {
            id: id.into(),
            price: None,
            material: None,
            manufacturer: None,
        }
    }
}

/// A mat board selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MatRecord {
    /// Catalog item number.
    pub id: String,

    /// Wholesale board price, in `price_unit`.
    #[ts(type = "string | null")]
    pub price: Option<Decimal>,

    /// Unit of `price`. Defaults to per square foot.
    #[serde(default)]
    pub price_unit: AreaUnit,
}

impl MatRecord {
    pub fn new(id: impl Into<String>, price: Option<Decimal>, price_unit: AreaUnit) -> Self {
        MatRecord {
            id: id.into(),
            price,
            price_unit,
        }
    }

    /// The record's wholesale price tagged with its unit, if present.
    pub fn wholesale_rate(&self) -> Option<AreaRate> {
        self.price.map(|amount| AreaRate {
            amount,
            unit: self.price_unit,
        })
    }
}

/// A glazing selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlassRecord {
    /// Catalog item number.
    pub id: String,

    /// Wholesale price per square inch.
    #[ts(type = "string | null")]
    pub price: Option<Decimal>,

    /// Product name, used to infer the glass grade.
    pub name: String,
}

impl GlassRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Option<Decimal>) -> Self {
        GlassRecord {
            id: id.into(),
            price,
            name: name.into(),
        }
    }

    /// The record's wholesale price per square inch, if present.
    pub fn wholesale_rate(&self) -> Option<AreaRate> {
        self.price.map(AreaRate::per_square_inch)
    }

    /// The glass grade inferred from the product name.
    pub fn glass_type(&self) -> GlassType {
        GlassType::infer(&self.name)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Artwork and mat dimensions in inches, as entered on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    #[ts(type = "string")]
    pub artwork_width: Decimal,
    #[ts(type = "string")]
    pub artwork_height: Decimal,
    /// Mat border on each side. Zero when unmatted.
    #[serde(default)]
    #[ts(type = "string")]
    pub mat_width: Decimal,
}

impl Geometry {
    /// Creates geometry from artwork size and mat border.
    pub const fn new(artwork_width: Decimal, artwork_height: Decimal, mat_width: Decimal) -> Self {
        Geometry {
            artwork_width,
            artwork_height,
            mat_width,
        }
    }

    /// Derives the finished opening.
    ///
    /// The mat border widens each side only when a mat is actually used.
    /// Call after [`crate::validation::validate_geometry`]. With every side
    /// at most [`crate::MAX_DIMENSION_INCHES`], the derived measures stay
    /// under 30,000 in and 9e8 sq-in.
    pub fn finish(&self, matted: bool) -> FinishedGeometry {
        let border = if matted {
            self.mat_width * Decimal::TWO
        } else {
            Decimal::ZERO
        };
        FinishedGeometry {
            artwork_width: self.artwork_width,
            artwork_height: self.artwork_height,
            outer_width: self.artwork_width + border,
            outer_height: self.artwork_height + border,
        }
    }
}

/// Artwork plus finished (outer) dimensions, with the derived measures the
/// pricers are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedGeometry {
    pub artwork_width: Decimal,
    pub artwork_height: Decimal,
    pub outer_width: Decimal,
    pub outer_height: Decimal,
}

impl FinishedGeometry {
    /// Outer width + outer height.
    pub fn united_inches(&self) -> Decimal {
        self.outer_width + self.outer_height
    }

    /// Frame perimeter in feet.
    pub fn perimeter_feet(&self) -> Decimal {
        self.united_inches() * Decimal::TWO / Decimal::from(INCHES_PER_FOOT)
    }

    /// Outer area in square inches (glass, backing).
    pub fn outer_area(&self) -> Decimal {
        self.outer_width * self.outer_height
    }

    /// Visible mat area in square inches: outer area minus the artwork.
    pub fn mat_area(&self) -> Decimal {
        self.outer_area() - self.artwork_width * self.artwork_height
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_bps(800);
        assert_eq!(rate.bps(), 800);
        assert_eq!(rate.as_decimal(), dec!(0.08));
        assert_eq!(rate.percentage(), dec!(8));
        assert_eq!(rate.to_string(), "8.00%");
        assert_eq!(Rate::default(), Rate::zero());
    }

    #[test]
    fn test_area_rate_conversions() {
        let per_foot = AreaRate::per_square_foot(dec!(4));
        assert_eq!(per_foot.price_per_square_foot(), dec!(4));
        // 4/144 does not terminate, so compare after rounding
        assert_eq!(
            (per_foot.price_per_square_inch() * dec!(144)).round_dp(10),
            dec!(4)
        );

        assert_eq!(per_foot.cost_of(dec!(288)).unwrap(), dec!(8));

        let per_inch = AreaRate::per_square_inch(dec!(0.02));
        assert_eq!(per_inch.cost_of(dec!(720)).unwrap(), dec!(14.40));
        assert!(AreaRate::per_square_inch(dec!(2)).cost_of(Decimal::MAX).is_err());
        assert_eq!(per_inch.price_per_square_inch(), dec!(0.02));
        assert_eq!(per_inch.price_per_square_foot(), dec!(2.88));
    }

    #[test]
    fn test_glass_type_inference() {
        assert_eq!(GlassType::infer("MUSEUM GLASS"), GlassType::Museum);
        assert_eq!(GlassType::infer("UV Shield"), GlassType::Museum);
        assert_eq!(GlassType::infer("Conservation Reflection Control"), GlassType::Conservation);
        assert_eq!(GlassType::infer("Clear Acrylic"), GlassType::Conservation);
        assert_eq!(GlassType::infer("Standard 2mm"), GlassType::Regular);
        assert_eq!(GlassType::infer(""), GlassType::Regular);
        // museum/uv wins over clear
        assert_eq!(GlassType::infer("UV Clear"), GlassType::Museum);
    }

    #[test]
    fn test_pricing_method_parsing() {
        assert_eq!("chop".parse::<FramePricingMethod>().unwrap(), FramePricingMethod::Chop);
        assert_eq!("LENGTH".parse::<FramePricingMethod>().unwrap(), FramePricingMethod::Length);
        assert_eq!("join".parse::<FramePricingMethod>().unwrap(), FramePricingMethod::Join);
        assert!("glue".parse::<FramePricingMethod>().is_err());
        assert_eq!(FramePricingMethod::default(), FramePricingMethod::Chop);
    }

    #[test]
    fn test_finished_geometry_with_mat() {
        let geometry = Geometry::new(dec!(20), dec!(16), dec!(5));
        let finished = geometry.finish(true);
        assert_eq!(finished.outer_width, dec!(30));
        assert_eq!(finished.outer_height, dec!(26));
        assert_eq!(finished.united_inches(), dec!(56));
        assert_eq!(finished.outer_area(), dec!(780));
        assert_eq!(finished.mat_area(), dec!(460));
    }

    #[test]
    fn test_finished_geometry_without_mat() {
        let geometry = Geometry::new(dec!(18), dec!(24), dec!(3));
        let finished = geometry.finish(false);
        assert_eq!(finished.outer_width, dec!(18));
        assert_eq!(finished.united_inches(), dec!(42));
        assert_eq!(finished.perimeter_feet(), dec!(7));
        assert_eq!(finished.mat_area(), dec!(0));
    }

    #[test]
    fn test_record_rates() {
        let mat = MatRecord {
            id: "MAT-1".to_string(),
            price: Some(dec!(4)),
            price_unit: AreaUnit::PerSquareFoot,
        };
        assert_eq!(mat.wholesale_rate(), Some(AreaRate::per_square_foot(dec!(4))));

        let glass = GlassRecord {
            id: "GL-1".to_string(),
            price: None,
            name: "Museum".to_string(),
        };
        assert_eq!(glass.wholesale_rate(), None);
        assert_eq!(glass.glass_type(), GlassType::Museum);
    }

    #[test]
    fn test_mat_record_unit_defaults_to_square_foot() {
        let mat: MatRecord = serde_json::from_str(r#"{"id":"MAT-2","price":"3.50"}"#).unwrap();
        assert_eq!(mat.price_unit, AreaUnit::PerSquareFoot);
        assert_eq!(mat.price, Some(dec!(3.50)));
    }
}
