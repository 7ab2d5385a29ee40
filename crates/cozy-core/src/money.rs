//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Stored as REAL:                                                        │
//! │    799.9 * 3 = 2399.7000000000003   ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kopecks                                          │
//! │    79_990 * 3 = 239_970  (2399.70)  ✅ exact                            │
//! │                                                                         │
//! │  Database columns: price_cents, unit_price_cents, total_price_cents    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cozy_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_cents(79_900); // 799.00
//!
//! // Parse what the user typed into the price field
//! let typed = Money::parse("799,50").unwrap();
//! assert_eq!(typed.cents(), 79_950);
//!
//! // Arithmetic operations
//! let total = price + typed;
//! assert_eq!(total.to_string(), "1598.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Number of minor units in one major unit (kopecks per rouble).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (kopecks).
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price_cents ──► NewCartItem.unit_price_cents (frozen)          │
/// │                                   │                                     │
/// │                                   ▼                                     │
/// │                          total = unit x quantity                        │
/// │                                   │                                     │
/// │  CartTotals.total ◄───────────────┘ ──► Displayed as "1598.50 ₽"        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use cozy_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole roubles.
    ///
    /// Used by the seed catalog, whose prices are all whole amounts.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (roubles) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use cozy_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(59_900); // 599.00
    /// let line_total = unit_price.checked_multiply_quantity(2).unwrap();
    /// assert_eq!(line_total.cents(), 119_800);
    ///
    /// assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a user-typed amount such as `"799"`, `"799.5"` or `"799,50"`.
    ///
    /// ## Accepted Input
    /// ```text
    /// ┌──────────────┬──────────────┐
    /// │ Input        │ Result       │
    /// ├──────────────┼──────────────┤
    /// │ "799"        │ 79_900       │
    /// │ " 799.5 "    │ 79_950       │
    /// │ "799,05"     │ 79_905       │
    /// │ "-10"        │ -1_000       │
    /// │ "7.999"      │ None         │
    /// │ "abc", ""    │ None         │
    /// └──────────────┴──────────────┘
    /// ```
    ///
    /// Both `.` and `,` are accepted as the decimal separator since the
    /// storefront runs with a Russian locale. At most two fractional digits
    /// are allowed; anything more precise cannot be stored.
    pub fn parse(input: &str) -> Option<Money> {
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match digits.find(['.', ',']) {
            Some(idx) => (&digits[..idx], &digits[idx + 1..]),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > 2
        {
            return None;
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };

        let cents = major.checked_mul(MINOR_PER_MAJOR)?.checked_add(minor)?;
        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the plain amount with two decimals, e.g. `1598.50`.
///
/// The currency symbol is appended by the storefront's config state, which
/// knows the configured currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(11235).cents(), 1_123_500);
        assert_eq!(Money::from_major(0), Money::zero());
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_multiply_quantity() {
        let unit_price = Money::from_cents(29_900);
        assert_eq!(
            unit_price.checked_multiply_quantity(3),
            Some(Money::from_cents(89_700))
        );
        assert_eq!(Money::from_cents(i64::MAX / 2 + 1).checked_multiply_quantity(2), None);
    }

    #[test]
    fn test_parse_accepts_both_separators() {
        assert_eq!(Money::parse("799"), Some(Money::from_cents(79_900)));
        assert_eq!(Money::parse("799.5"), Some(Money::from_cents(79_950)));
        assert_eq!(Money::parse("799,50"), Some(Money::from_cents(79_950)));
        assert_eq!(Money::parse("  12,05 "), Some(Money::from_cents(1205)));
        assert_eq!(Money::parse(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse("7."), Some(Money::from_cents(700)));
        assert_eq!(Money::parse("-10"), Some(Money::from_cents(-1000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("   "), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("12.345"), None);
        assert_eq!(Money::parse("1.2.3"), None);
        assert_eq!(Money::parse("1 000"), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("99999999999999999999"), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
