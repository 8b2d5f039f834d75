//! # Money
//!
//! Every amount in Stockroom (unit prices, order totals, discounts, bill
//! balances) is a whole number of cents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  column                      Money                     wire             │
//! │  unit_price_cents  2599  ──► Money(2599)  ──► Display "$25.99"          │
//! │                                         └──► serde    2599              │
//! │                                                                         │
//! │  gross     = unit_price × quantity       (checked)                      │
//! │  discount  = gross.percentage(bps)       (rounded half up)              │
//! │  total     = gross − discount                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An amount in cents. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

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

    /// Line total for `qty` units at this unit price, or `None` when it does
    /// not fit in an `i64` of cents.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2599).checked_multiply_quantity(4), Some(Money::from_cents(10396)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `bps` basis points of this amount, rounded half up (2500 bps = 25%).
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10000).percentage(2500).cents(), 2500);
    /// assert_eq!(Money::from_cents(999).percentage(500).cents(), 50);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 so large totals don't overflow before the division
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(part as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}
