//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Marketplace prices are quoted in whole currency units (no minor unit). │
//! │                                                                         │
//! │    price 50,000 + shipping 3,000 - coupon 5,000 = 48,000               │
//! │                                                                         │
//! │  Every amount is an i64 count of units. No floats anywhere, so the      │
//! │  summary the UI shows is exactly what the payment widget receives.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_units(50_000);
//! let shipping = Money::from_units(3_000);
//!
//! let total = price + shipping;
//! assert_eq!(total.units(), 53_000);
//! assert_eq!(total.to_string(), "53,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps; callers that need a floor use
///   [`Money::saturating_sub`]
/// - **Single field tuple struct**: zero-cost wrapper, serializes as a plain number
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──┐
/// LineItem.shipping_fee ┼──► OrderSummary ──► PaymentRequest.amount
/// Coupon.discount_amount┤
/// Deposit balance ──────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_units(10_000);
    /// assert_eq!(price.units(), 10_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let payable = Money::from_units(3_000);
    /// let discount = Money::from_units(5_000);
    /// assert_eq!(payable.saturating_sub(discount), Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Money::zero()
        } else {
            Money(self.0 - other.0)
        }
    }

    /// Adds `other`, saturating at `i64::MAX` instead of overflowing.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the amount with thousands separators (`48,000`).
///
/// ## Note
/// No currency symbol here; placement is a client configuration concern.
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
            write!(f, "{}", grouped)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summing line amounts (`items.map(|i| i.unit_price).sum()`).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(48_000);
        assert_eq!(money.units(), 48_000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_units(0).to_string(), "0");
        assert_eq!(Money::from_units(999).to_string(), "999");
        assert_eq!(Money::from_units(1_000).to_string(), "1,000");
        assert_eq!(Money::from_units(48_000).to_string(), "48,000");
        assert_eq!(Money::from_units(1_234_567).to_string(), "1,234,567");
        assert_eq!(Money::from_units(-5_000).to_string(), "-5,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(50_000);
        let b = Money::from_units(3_000);

        assert_eq!((a + b).units(), 53_000);
        assert_eq!((a - b).units(), 47_000);

        let mut c = a;
        c += b;
        c -= Money::from_units(5_000);
        assert_eq!(c.units(), 48_000);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let small = Money::from_units(3_000);
        let large = Money::from_units(5_000);

        assert_eq!(small.saturating_sub(large), Money::zero());
        assert_eq!(large.saturating_sub(small).units(), 2_000);
        assert_eq!(small.saturating_sub(small), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_units(10_000),
            Money::from_units(20_000),
            Money::from_units(300),
        ];
        let owned: Money = amounts.iter().copied().sum();
        let borrowed: Money = amounts.iter().sum();

        assert_eq!(owned.units(), 30_300);
        assert_eq!(owned, borrowed);
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_units(48_000)).unwrap();
        assert_eq!(json, "48000");
    }
}
