//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A quote is recomputed on every keystroke and must come out             │
//! │  bit-identical each time. Floating point cannot promise that.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Yen                                              │
//! │    Prices are whole yen (i64). Rates are basis points (u32).            │
//! │    Every rounding step is an exact integer operation.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//!
//! The engine uses three DIFFERENT roundings, on purpose:
//! - selling prices round UP to the next multiple of 10 yen
//!   ([`Money::ceil_to_ten`], [`Money::scale_ceil_to_ten`]);
//! - consumption tax rounds DOWN to the yen ([`Money::calculate_tax`]);
//! - the per-unit figure on the quote rounds half-up ([`Money::per_unit`]).
//!
//! ## Usage
//! ```rust
//! use printcraft_core::money::{Money, Rate};
//!
//! let purchase = Money::from_yen(500);
//!
//! // 500 × (1 + 30%) = 650, already a multiple of 10
//! let selling = purchase.markup_ceil_to_ten(Rate::from_bps(3000));
//! assert_eq!(selling.yen(), 650);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: discount deltas can go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole yen.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::Money;
    ///
    /// let price = Money::from_yen(1500);
    /// assert_eq!(price.yen(), 1500);
    /// ```
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Money(yen)
    }

    /// Returns the value in yen.
    #[inline]
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Rounds UP to the next multiple of 10 yen.
    ///
    /// Selling prices on a quote always land on a 10-yen boundary.
    /// Values already on the boundary are unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::Money;
    ///
    /// assert_eq!(Money::from_yen(511).ceil_to_ten().yen(), 520);
    /// assert_eq!(Money::from_yen(520).ceil_to_ten().yen(), 520);
    /// assert_eq!(Money::from_yen(0).ceil_to_ten().yen(), 0);
    /// ```
    #[inline]
    pub const fn ceil_to_ten(&self) -> Self {
        Money((self.0 + 9).div_euclid(10) * 10)
    }

    /// Scales by a rate, then rounds UP to the next multiple of 10 yen.
    ///
    /// The two steps happen in ONE exact integer operation so that a
    /// fractional raw price is never truncated before the ceiling:
    /// `ceil(yen × bps / 10000 / 10) × 10`.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::{Money, Rate};
    ///
    /// // 1000 × 0.52 = 520, already a multiple of 10
    /// let list = Money::from_yen(1000);
    /// assert_eq!(list.scale_ceil_to_ten(Rate::from_bps(5200)).yen(), 520);
    ///
    /// // 999 × 0.52 = 519.48 → 520
    /// let list = Money::from_yen(999);
    /// assert_eq!(list.scale_ceil_to_ten(Rate::from_bps(5200)).yen(), 520);
    /// ```
    pub fn scale_ceil_to_ten(&self, rate: Rate) -> Money {
        // i128 to prevent overflow on large amounts.
        // ceil(n × bps / 100000) × 10 == ceil(n × bps / 10000 / 10) × 10
        let raw = self.0 as i128 * rate.bps() as i128;
        Money::from_yen((raw.div_euclid(100_000) + if raw.rem_euclid(100_000) > 0 { 1 } else { 0 }) as i64 * 10)
    }

    /// Scales by `1 + rate` (a markup over a purchase price), then rounds
    /// UP to the next multiple of 10 yen.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::{Money, Rate};
    ///
    /// // 500 × (1 + 0.30) = 650
    /// let purchase = Money::from_yen(500);
    /// assert_eq!(purchase.markup_ceil_to_ten(Rate::from_bps(3000)).yen(), 650);
    /// ```
    pub fn markup_ceil_to_ten(&self, markup: Rate) -> Money {
        self.scale_ceil_to_ten(Rate::from_bps(Rate::UNITY_BPS + markup.bps()))
    }

    /// Calculates consumption tax, rounding DOWN to the yen.
    ///
    /// Asymmetric with the ceil-to-10 used for selling prices: the tax
    /// authority truncates, the price list rounds up.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::Money;
    /// use printcraft_core::types::TaxRate;
    ///
    /// // 9800 × 10% = 980
    /// let base = Money::from_yen(9800);
    /// assert_eq!(base.calculate_tax(TaxRate::from_bps(1000)).yen(), 980);
    ///
    /// // 1234 × 10% = 123.4 → 123 (floor)
    /// let base = Money::from_yen(1234);
    /// assert_eq!(base.calculate_tax(TaxRate::from_bps(1000)).yen(), 123);
    /// ```
    pub fn calculate_tax(&self, rate: crate::types::TaxRate) -> Money {
        // i128 to prevent overflow on large amounts; div_euclid floors
        let tax = (self.0 as i128 * rate.bps() as i128).div_euclid(10_000);
        Money::from_yen(tax as i64)
    }

    /// Divides by a quantity, rounding half-up. Zero quantity yields zero.
    ///
    /// Used for the informational per-unit figure on the quote footer.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::Money;
    ///
    /// // 10780 / 50 = 215.6 → 216
    /// assert_eq!(Money::from_yen(10780).per_unit(50).yen(), 216);
    /// assert_eq!(Money::from_yen(10780).per_unit(0).yen(), 0);
    /// ```
    pub fn per_unit(&self, quantity: i64) -> Money {
        if quantity <= 0 {
            return Money::zero();
        }
        let rounded = (2 * self.0 as i128 + quantity as i128).div_euclid(2 * quantity as i128);
        Money::from_yen(rounded as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use printcraft_core::money::Money;
    ///
    /// let unit_price = Money::from_yen(650);
    /// assert_eq!(unit_price.multiply_quantity(20).yen(), 13000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A multiplier or markup expressed in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 5200 bps = ×0.52, 3000 bps markup = +30%, 18000 bps = ×1.8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Basis points equal to ×1.0.
    pub const UNITY_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a factor (for convenience; 0.52 → 5200 bps).
    pub fn from_factor(factor: f64) -> Self {
        Rate((factor * 10_000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
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

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}¥{}", sign, self.0.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (bucket totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
