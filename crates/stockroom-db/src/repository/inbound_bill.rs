//! # Inbound Bill Repository
//!
//! Payables owed to suppliers. One bill is opened automatically for every
//! supplier order; bills are removed with their order (ON DELETE CASCADE).
//!
//! ## Payment
//! ```text
//! pay(id, amount)
//!   ├── load bill            (None → Ok(None))
//!   ├── InboundBill::apply_payment(amount)   rules live in stockroom-core
//!   └── write amount_due / amount_paid / payment_status
//! ```

use chrono::NaiveDate;
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::DbResult;
use stockroom_core::validation::validate_non_negative;
use stockroom_core::{InboundBill, InboundBillStatus, Money, NewInboundBill};

const INBOUND_BILL_COLUMNS: &str = "id, supplier_order_id, bill_date, due_date, \
     amount_due_cents, amount_paid_cents, payment_status";

pub struct InboundBillRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> InboundBillRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        InboundBillRepository { conn }
    }

    /// Opens a `Pending` bill with nothing paid.
    pub async fn create(&mut self, input: &NewInboundBill) -> DbResult<InboundBill> {
        validate_non_negative("amount_due_cents", input.amount_due_cents)?;

        let sql = format!(
            "INSERT INTO inbound_bills (supplier_order_id, bill_date, due_date,
                                        amount_due_cents, amount_paid_cents, payment_status)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)
             RETURNING {INBOUND_BILL_COLUMNS}"
        );
        let bill = sqlx::query_as::<_, InboundBill>(&sql)
            .bind(input.supplier_order_id)
            .bind(input.bill_date)
            .bind(input.due_date)
            .bind(input.amount_due_cents)
            .bind(InboundBillStatus::Pending)
            .fetch_one(&mut *self.conn)
            .await?;

        debug!(
            id = bill.id,
            supplier_order_id = bill.supplier_order_id,
            amount_due = %bill.amount_due(),
            "Inbound bill created"
        );
        Ok(bill)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<InboundBill>> {
        let sql = format!("SELECT {INBOUND_BILL_COLUMNS} FROM inbound_bills WHERE id = ?1");
        let bill = sqlx::query_as::<_, InboundBill>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(bill)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<InboundBill>> {
        let sql = format!("SELECT {INBOUND_BILL_COLUMNS} FROM inbound_bills ORDER BY id");
        let bills = sqlx::query_as::<_, InboundBill>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(bills)
    }

    pub async fn list_by_supplier_order(
        &mut self,
        supplier_order_id: i64,
    ) -> DbResult<Vec<InboundBill>> {
        let sql = format!(
            "SELECT {INBOUND_BILL_COLUMNS} FROM inbound_bills
             WHERE supplier_order_id = ?1 ORDER BY id"
        );
        let bills = sqlx::query_as::<_, InboundBill>(&sql)
            .bind(supplier_order_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(bills)
    }

    /// Records a payment. Returns `None` when the bill does not exist.
    ///
    /// ## Errors
    /// `Domain(InvalidPaymentAmount)` for a non-positive payment or one larger
    /// than the current amount due.
    pub async fn pay(&mut self, id: i64, amount: Money) -> DbResult<Option<InboundBill>> {
        let Some(mut bill) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        bill.apply_payment(amount)?;

        let sql = format!(
            "UPDATE inbound_bills
             SET amount_due_cents = ?2, amount_paid_cents = ?3, payment_status = ?4
             WHERE id = ?1
             RETURNING {INBOUND_BILL_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, InboundBill>(&sql)
            .bind(id)
            .bind(bill.amount_due_cents)
            .bind(bill.amount_paid_cents)
            .bind(bill.payment_status)
            .fetch_optional(&mut *self.conn)
            .await?;

        info!(
            id = id,
            paid = %amount,
            remaining = %bill.amount_due(),
            status = ?bill.payment_status,
            "Inbound bill payment recorded"
        );
        Ok(updated)
    }

    /// Moves the due date of every bill on a supplier order.
    pub(crate) async fn reschedule_for_order(
        &mut self,
        supplier_order_id: i64,
        due_date: NaiveDate,
    ) -> DbResult<u64> {
        let result = sqlx::query("UPDATE inbound_bills SET due_date = ?2 WHERE supplier_order_id = ?1")
            .bind(supplier_order_id)
            .bind(due_date)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM inbound_bills WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Inbound bill delete");
        Ok(result.rows_affected() > 0)
    }
}
