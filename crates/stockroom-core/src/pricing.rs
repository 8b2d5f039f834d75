//! # Pricing Module
//!
//! Order totals and membership discounts.
//!
//! ## Customer Order Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit price × quantity ──► gross total                                  │
//! │                               │                                         │
//! │           membership type ────┤                                         │
//! │             "premium"  25%    │                                         │
//! │             "classic"   5%    ▼                                         │
//! │             other/none  0%   discount = gross × tier                    │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                    stored total = gross - discount                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tier names are matched exactly (case-sensitive), the same way they are
//! stored on the membership row.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Discount tier derived from a membership type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipTier {
    Premium,
    Classic,
    /// Unknown membership type, or no membership at all.
    Standard,
}

impl MembershipTier {
    /// Resolves the tier for a customer's membership type.
    pub fn from_membership_type(membership_type: Option<&str>) -> Self {
        match membership_type {
            Some("premium") => MembershipTier::Premium,
            Some("classic") => MembershipTier::Classic,
            _ => MembershipTier::Standard,
        }
    }

    /// Discount in basis points (2500 = 25%).
    pub const fn discount_bps(&self) -> u32 {
        match self {
            MembershipTier::Premium => 2500,
            MembershipTier::Classic => 500,
            MembershipTier::Standard => 0,
        }
    }
}

/// Result of pricing a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPricing {
    /// Gross total before discount.
    pub gross: Money,
    pub discount: Money,
    /// Net total stored on the order.
    pub total: Money,
}

/// Gross total of an order line.
///
/// Fails with [`CoreError::AmountOverflow`] when the total does not fit in
/// an `i64` of cents.
pub fn order_total(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    unit_price
        .checked_multiply_quantity(quantity)
        .ok_or(CoreError::AmountOverflow {
            unit_price_cents: unit_price.cents(),
            quantity,
        })
}

/// Prices a customer order for the given membership type.
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::pricing::price_customer_order;
///
/// let pricing = price_customer_order(Money::from_cents(10000), 1, Some("classic")).unwrap();
/// assert_eq!(pricing.discount.cents(), 500);
/// assert_eq!(pricing.total.cents(), 9500);
/// ```
pub fn price_customer_order(
    unit_price: Money,
    quantity: i64,
    membership_type: Option<&str>,
) -> CoreResult<OrderPricing> {
    let gross = order_total(unit_price, quantity)?;
    let tier = MembershipTier::from_membership_type(membership_type);
    let discount = gross.percentage(tier.discount_bps());

    Ok(OrderPricing {
        gross,
        discount,
        total: gross - discount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
