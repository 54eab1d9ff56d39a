//! # Markup Tables
//!
//! Tiered lookup tables mapping a key (wholesale $/ft or united inches) to a
//! markup multiplier, a minimum charge, or a flat charge.
//!
//! ## Tier Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mat table (step = 1 united inch)                                      │
//! │                                                                         │
//! │   [0 ─── 32]  [33 ─── 48]  [49 ─── 60]  [61 ─── 80]  ...  [101 ─── ∞)  │
//! │     3.00×        2.75×        2.50×        2.25×            1.85×      │
//! │                                                                         │
//! │  key = 54      → normalize (ceil to step) = 54 → [49, 60]              │
//! │  key = 48.25   → normalize = 49            → [49, 60]                  │
//! │  key = 48      → normalize = 48            → [33, 48]                  │
//! │  key < 0 or key past a finite last bound   → LAST tier                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants (checked at construction and deserialization)
//! - At least one tier
//! - `next.range_low == prev.range_high + step`: no gaps, no overlaps
//! - Only the last tier may be unbounded
//!
//! Lookups never fail: a key no tier contains resolves to the last tier,
//! which keeps historical quotes reproducible.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PricingError, PricingResult};

// =============================================================================
// Tier Values
// =============================================================================

/// Payload carried by a tier.
pub trait TierValue {
    /// Checks the payload's own invariants, returning the reason on failure.
    fn check(&self) -> Result<(), String>;
}

/// A markup multiplier with an optional price floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    /// Retail = wholesale basis × multiplier.
    pub multiplier: Decimal,

    /// Retail is never below this amount when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<Decimal>,
}

impl Markup {
    /// A plain multiplier.
    pub fn new(multiplier: Decimal) -> Self {
        Markup {
            multiplier,
            minimum_charge: None,
        }
    }

    /// A multiplier with a price floor.
    pub fn with_minimum(multiplier: Decimal, minimum_charge: Decimal) -> Self {
        Markup {
            multiplier,
            minimum_charge: Some(minimum_charge),
        }
    }

    /// The floor, or zero when the tier has none.
    pub fn floor(&self) -> Decimal {
        self.minimum_charge.unwrap_or(Decimal::ZERO)
    }
}

impl TierValue for Markup {
    fn check(&self) -> Result<(), String> {
        if self.multiplier < Decimal::ZERO {
            return Err(format!("negative multiplier {}", self.multiplier));
        }
        if let Some(min) = self.minimum_charge {
            if min < Decimal::ZERO {
                return Err(format!("negative minimum charge {}", min));
            }
        }
        Ok(())
    }
}

/// A flat charge (e.g. glass handling charge by opening size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub charge: Decimal,
}

impl TierValue for Charge {
    fn check(&self) -> Result<(), String> {
        if self.charge < Decimal::ZERO {
            return Err(format!("negative charge {}", self.charge));
        }
        Ok(())
    }
}

// =============================================================================
// Tier
// =============================================================================

/// One contiguous key range of a table. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier<V> {
    pub range_low: Decimal,

    /// `None` = unbounded (last tier only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_high: Option<Decimal>,

    #[serde(flatten)]
    pub value: V,
}

impl<V> Tier<V> {
    /// A bounded tier `[low, high]`.
    pub fn bounded(range_low: Decimal, range_high: Decimal, value: V) -> Self {
        Tier {
            range_low,
            range_high: Some(range_high),
            value,
        }
    }

    /// An open-ended tier `[low, ∞)`.
    pub fn unbounded(range_low: Decimal, value: V) -> Self {
        Tier {
            range_low,
            range_high: None,
            value,
        }
    }

    /// Inclusive containment check.
    pub fn contains(&self, key: Decimal) -> bool {
        key >= self.range_low && self.range_high.map_or(true, |high| key <= high)
    }
}

/// A tier carrying a markup multiplier and optional minimum charge.
pub type MarkupTier = Tier<Markup>;

// =============================================================================
// Tier Table
// =============================================================================

/// An immutable, validated tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierTable<V> {
    name: String,
    step: Decimal,
    tiers: Vec<Tier<V>>,
}

/// Multiplier/minimum tables (frame, mat, glass markup).
pub type MarkupTable = TierTable<Markup>;

/// Flat-charge tables (glass base charge).
pub type ChargeTable = TierTable<Charge>;

impl<V: TierValue> TierTable<V> {
    /// Builds a table, checking every invariant.
    ///
    /// ## Errors
    /// - `UnresolvableTier` when `tiers` is empty
    /// - `InvalidMarkupTable` for a non-positive step, an inverted range, a
    ///   gap/overlap between neighbours, an unbounded tier before the last,
    ///   or an invalid tier value
    ///
    /// ## Example
    /// ```rust
    /// use frameshop_core::markup::{Markup, MarkupTable, Tier};
    /// use rust_decimal_macros::dec;
    ///
    /// let table = MarkupTable::new(
    ///     "example",
    ///     dec!(1),
    ///     vec![
    ///         Tier::bounded(dec!(0), dec!(20), Markup::new(dec!(3))),
    ///         Tier::unbounded(dec!(21), Markup::new(dec!(2))),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(table.resolve(dec!(20)).value.multiplier, dec!(3));
    /// assert_eq!(table.resolve(dec!(21)).value.multiplier, dec!(2));
    /// ```
    pub fn new(name: impl Into<String>, step: Decimal, tiers: Vec<Tier<V>>) -> PricingResult<Self> {
        let name = name.into();
        check_tiers(&name, step, &tiers)?;
        Ok(TierTable { name, step, tiers })
    }

    /// Builds one of the shipped calibration tables.
    ///
    /// Those tables are covered by tests, so construction is infallible here.
    pub(crate) fn builtin(name: &str, step: Decimal, tiers: Vec<Tier<V>>) -> Self {
        debug_assert!(
            check_tiers(name, step, &tiers).is_ok(),
            "builtin table '{}' is invalid",
            name
        );
        TierTable {
            name: name.to_string(),
            step,
            tiers,
        }
    }
}

impl<V> TierTable<V> {
    /// Table name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key resolution: keys are rounded up to a multiple of this.
    pub fn step(&self) -> Decimal {
        self.step
    }

    /// The tiers in ascending order.
    pub fn tiers(&self) -> &[Tier<V>] {
        &self.tiers
    }

    /// Rounds a key up to the table's step (48.25 → 49 for step 1).
    ///
    /// `None` when the key is too large to round, which places it beyond
    /// every bounded tier.
    pub fn normalize_key(&self, key: Decimal) -> Option<Decimal> {
        key.checked_div(self.step)?.ceil().checked_mul(self.step)
    }

    /// Resolves the tier for `key`: first inclusive match, else the last tier.
    pub fn resolve(&self, key: Decimal) -> &Tier<V> {
        self.resolve_indexed(key).1
    }

    /// Like [`resolve`](Self::resolve), also returning the tier's position.
    pub fn resolve_indexed(&self, key: Decimal) -> (usize, &Tier<V>) {
        let last = self.tiers.len() - 1; // non-empty by construction
        self.normalize_key(key)
            .and_then(|key| {
                self.tiers
                    .iter()
                    .enumerate()
                    .find(|(_, tier)| tier.contains(key))
            })
            .unwrap_or((last, &self.tiers[last]))
    }
}

fn check_tiers<V: TierValue>(name: &str, step: Decimal, tiers: &[Tier<V>]) -> PricingResult<()> {
    let invalid = |reason: String| PricingError::InvalidMarkupTable {
        table: name.to_string(),
        reason,
    };

    if tiers.is_empty() {
        return Err(PricingError::UnresolvableTier {
            table: name.to_string(),
        });
    }

    if step <= Decimal::ZERO {
        return Err(invalid(format!("step must be positive, got {}", step)));
    }

    let mut previous_high: Option<Option<Decimal>> = None;
    for (index, tier) in tiers.iter().enumerate() {
        if let Some(high) = tier.range_high {
            if high < tier.range_low {
                return Err(invalid(format!(
                    "tier {} has range_high {} below range_low {}",
                    index, high, tier.range_low
                )));
            }
        }

        tier.value
            .check()
            .map_err(|reason| invalid(format!("tier {}: {}", index, reason)))?;

        match previous_high {
            None => {}
            Some(None) => {
                return Err(invalid(format!(
                    "tier {} follows an unbounded tier",
                    index
                )));
            }
            Some(Some(high)) => {
                let expected = high.checked_add(step).ok_or_else(|| {
                    invalid(format!("tier {} follows a tier ending at {}", index, high))
                })?;
                if tier.range_low != expected {
                    return Err(invalid(format!(
                        "tier {} starts at {}, expected {} (gap or overlap)",
                        index, tier.range_low, expected
                    )));
                }
            }
        }
        previous_high = Some(tier.range_high);
    }

    Ok(())
}

// =============================================================================
// Deserialization
// =============================================================================

#[derive(Deserialize)]
struct RawTierTable<V> {
    name: String,
    step: Decimal,
    tiers: Vec<Tier<V>>,
}

/// Tables read from configuration go through the same checks as
/// [`TierTable::new`].
impl<'de, V> Deserialize<'de> for TierTable<V>
where
    V: TierValue + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTierTable::<V>::deserialize(deserializer)?;
        TierTable::new(raw.name, raw.step, raw.tiers).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
