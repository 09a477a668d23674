//! # Money Module
//!
//! Provides the `Money` type for menu prices and cart totals.
//!
//! ## No Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kiosk prices are whole won: 4000, 5500, 12500                         │
//! │                                                                         │
//! │  There is no cents part, so there is nothing to round:                 │
//! │    line total  = price × quantity                                      │
//! │    cart total  = Σ line totals                                         │
//! │                                                                         │
//! │  Everything stays an integer from catalog to checkout footer.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_amount(4000);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.amount(), 8000);
//! assert_eq!(line_total.to_string(), "8,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the currency's only unit.
///
/// ## Design Decisions
/// - **i64**: headroom for totals; catalog prices are validated non-negative
/// - **Newtype**: serde writes it as a bare number (`4000`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole amount.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_amount(5500);
    /// assert_eq!(price.amount(), 5500);
    /// ```
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Menu: 치킨 4,500
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Cart row shows 13,500
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the amount with thousands separators (`12,500`).
///
/// The currency suffix is a host concern and is not included.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            f.write_str(&grouped)
        }
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_amount(0).to_string(), "0");
        assert_eq!(Money::from_amount(500).to_string(), "500");
        assert_eq!(Money::from_amount(4000).to_string(), "4,000");
        assert_eq!(Money::from_amount(12500).to_string(), "12,500");
        assert_eq!(Money::from_amount(1234567).to_string(), "1,234,567");
        assert_eq!(Money::from_amount(-4500).to_string(), "-4,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_amount(4000);
        let b = Money::from_amount(4500);

        assert_eq!((a + b).amount(), 8500);
        assert_eq!((a * 2).amount(), 8000);

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total.amount(), 8500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [4000, 4500, 3000]
            .into_iter()
            .map(Money::from_amount)
            .sum();
        assert_eq!(total.amount(), 11500);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_amount(5500)).unwrap();
        assert_eq!(json, "5500");

        let back: Money = serde_json::from_str("2000").unwrap();
        assert_eq!(back, Money::from_amount(2000));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_amount(i64::MAX / 2 + 1);
        assert_eq!(huge.multiply_quantity(2).amount(), i64::MAX);
        assert_eq!((huge + huge).amount(), i64::MAX);

        let mut total = huge;
        total += huge;
        assert_eq!(total.amount(), i64::MAX);
    }
}
