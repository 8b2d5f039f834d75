//! # Billing Module
//!
//! Date offsets for orders and bills, and inbound bill payments.
//!
//! ## Timeline of a Supplier Order
//! ```text
//! order_date ──(+5 days)──► expected_delivery ──(+5 days)──► inbound due_date
//!     │
//!     └── inbound bill_date
//!
//! outbound bill_date ──(+2 days)──► outbound due_date
//! ```

use chrono::{Duration, NaiveDate};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InboundBill, InboundBillStatus};

/// Days between placing a supplier order and its expected delivery.
pub const DELIVERY_LEAD_DAYS: i64 = 5;

/// Days after expected delivery that an inbound bill falls due.
pub const INBOUND_PAYMENT_TERM_DAYS: i64 = 5;

/// Days after billing that an outbound bill falls due.
pub const OUTBOUND_PAYMENT_TERM_DAYS: i64 = 2;

pub fn expected_delivery_date(order_date: NaiveDate) -> NaiveDate {
    order_date + Duration::days(DELIVERY_LEAD_DAYS)
}

pub fn inbound_due_date(expected_delivery: NaiveDate) -> NaiveDate {
    expected_delivery + Duration::days(INBOUND_PAYMENT_TERM_DAYS)
}

pub fn outbound_due_date(bill_date: NaiveDate) -> NaiveDate {
    bill_date + Duration::days(OUTBOUND_PAYMENT_TERM_DAYS)
}

impl InboundBill {
    /// Records a payment against this bill.
    ///
    /// ## Rules
    /// - `amount_paid` is set to `payment` (it replaces, not accumulates)
    /// - `amount_due` is reduced by `payment`
    /// - status becomes `Success` only when `amount_due` is exactly zero
    ///
    /// ## Errors
    /// `InvalidPaymentAmount` when the payment is not positive or exceeds
    /// the current amount due. The bill is left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use stockroom_core::{InboundBill, InboundBillStatus, Money};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let mut bill = InboundBill {
    ///     id: 1,
    ///     supplier_order_id: 1,
    ///     bill_date: date,
    ///     due_date: date,
    ///     amount_due_cents: 5000,
    ///     amount_paid_cents: 0,
    ///     payment_status: InboundBillStatus::Pending,
    /// };
    ///
    /// bill.apply_payment(Money::from_cents(5000)).unwrap();
    /// assert_eq!(bill.payment_status, InboundBillStatus::Success);
    /// ```
    pub fn apply_payment(&mut self, payment: Money) -> CoreResult<()> {
        if !payment.is_positive() {
            return Err(CoreError::InvalidPaymentAmount {
                reason: format!("payment must be positive, got {}", payment),
            });
        }

        let due = self.amount_due();
        if payment > due {
            return Err(CoreError::InvalidPaymentAmount {
                reason: format!("payment {} exceeds amount due {}", payment, due),
            });
        }

        let remaining = due - payment;
        self.amount_paid_cents = payment.cents();
        self.amount_due_cents = remaining.cents();
        if remaining.is_zero() {
            self.payment_status = InboundBillStatus::Success;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
