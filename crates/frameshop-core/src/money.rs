//! # Money Module
//!
//! Provides the `Money` type for final monetary amounts.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INTERMEDIATE: rust_decimal::Decimal                                    │
//! │    $4.00/sq-ft ÷ 144 × 400 sq-in × 2.50 × 1.25 = 34.7222…              │
//! │    Full precision is carried through every component and through       │
//! │    subtotal, tax and quantity scaling.                                 │
//! │                                                                         │
//! │  FINAL: Money (integer cents)                                          │
//! │    Money::from_decimal(34.7222…) = 3472 cents = $34.72                 │
//! │    Rounding happens exactly once, when the breakdown is built.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frameshop_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::from_decimal(dec!(10.995)).unwrap();
//! assert_eq!(price.cents(), 1100); // half rounds away from zero
//! assert_eq!(price.to_string(), "$11.00");
//! ```
//!
//! Intermediate amounts are built with [`checked_product`] and
//! [`checked_sum`], which report overflow as
//! [`PricingError::AmountOutOfRange`] instead of panicking.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: gross profit can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as cents**: the web layer formats for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Number of fractional digits kept after rounding.
    pub const SCALE: u32 = 2;

    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an exact decimal amount to cents, half away from zero.
    ///
    /// Returns `None` when the amount does not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use frameshop_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_decimal(dec!(162)).unwrap().cents(), 16200);
    /// assert_eq!(Money::from_decimal(dec!(0.005)).unwrap().cents(), 1);
    /// assert_eq!(Money::from_decimal(dec!(-0.005)).unwrap().cents(), -1);
    /// assert_eq!(Money::from_decimal(dec!(34.7222)).unwrap().cents(), 3472);
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let rounded = value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as dollars.
///
/// ## Note
/// This is for logs and the CLI. The web UI formats cents itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Checked Decimal Arithmetic
// =============================================================================

/// Multiplies `factors` left to right.
///
/// ## Errors
/// `AmountOutOfRange` carrying the last representable partial product when
/// the next factor would overflow `Decimal`.
pub fn checked_product(factors: &[Decimal]) -> PricingResult<Decimal> {
    factors.iter().try_fold(Decimal::ONE, |acc, factor| {
        acc.checked_mul(*factor)
            .ok_or(PricingError::AmountOutOfRange { value: acc })
    })
}

/// Adds `terms` left to right, with the same overflow reporting as
/// [`checked_product`].
pub fn checked_sum(terms: &[Decimal]) -> PricingResult<Decimal> {
    terms.iter().try_fold(Decimal::ZERO, |acc, term| {
        acc.checked_add(*term)
            .ok_or(PricingError::AmountOutOfRange { value: acc })
    })
}

/// `numerator / denominator`, reporting overflow as `AmountOutOfRange`.
///
/// Callers guarantee a non-zero denominator.
pub fn checked_ratio(numerator: Decimal, denominator: Decimal) -> PricingResult<Decimal> {
    numerator
        .checked_div(denominator)
        .ok_or(PricingError::AmountOutOfRange { value: numerator })
}

// =============================================================================
// Unit Tests
// =============================================================================
