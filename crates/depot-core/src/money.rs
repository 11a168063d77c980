//! # Money Module
//!
//! Provides the `Money` type for cost and selling prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As doubles:  0.1 + 0.2 = 0.30000000000000004  ❌                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "2.00"  → 200 cents                                                  │
//! │    "5"     → 500 cents                                                  │
//! │    "0.5"   →  50 cents                                                  │
//! │                                                                         │
//! │  Prices are parsed once from form text and stored as INTEGER columns.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::money::Money;
//!
//! let cost = Money::parse_decimal("2.00").unwrap();
//!
//! assert_eq!(cost.cents(), 200);
//! assert_eq!(cost.to_string(), "2.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: margins can go negative when selling below cost
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text such as `"2.00"`, `"5"`, `".5"` or `"-1.25"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - At most two fractional digits (cents precision)
    /// - At least one digit somewhere
    ///
    /// Returns `None` for anything else, including overflow.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("2.5"), Some(Money::from_cents(250)));
    /// assert_eq!(Money::parse_decimal("1.999"), None);
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if frac.len() > 2 {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().ok()?.checked_mul(100)?
        };
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse::<i64>().ok()?,
        };

        let cents = whole_cents.checked_add(frac_cents)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
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

/// Plain decimal rendering (`"10.99"`, `"-5.50"`).
///
/// The output parses back through [`Money::parse_decimal`], so edit forms
/// can be pre-filled with it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_parse_decimal_accepts_form_text() {
        assert_eq!(Money::parse_decimal("2.00"), Some(Money::from_cents(200)));
        assert_eq!(Money::parse_decimal("5"), Some(Money::from_cents(500)));
        assert_eq!(Money::parse_decimal(" 12.3 "), Some(Money::from_cents(1230)));
        assert_eq!(Money::parse_decimal(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("7."), Some(Money::from_cents(700)));
        assert_eq!(Money::parse_decimal("-1.25"), Some(Money::from_cents(-125)));
        assert_eq!(Money::parse_decimal("+3"), Some(Money::from_cents(300)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("1.999"), None);
        assert_eq!(Money::parse_decimal("1,50"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_display_parses_back() {
        let amount = Money::from_cents(-4207);
        assert_eq!(Money::parse_decimal(&amount.to_string()), Some(amount));
    }
}
