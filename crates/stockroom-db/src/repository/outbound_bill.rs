//! # Outbound Bill Repository
//!
//! Invoices issued to customers against a customer order. The bill copies
//! the order's discount and is due two days after it is issued; its payment
//! status is free text maintained by the caller.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::CustomerOrderRepository;
use stockroom_core::billing::outbound_due_date;
use stockroom_core::validation::{validate_name, validate_non_negative};
use stockroom_core::{NewOutboundBill, OutboundBill, OutboundBillPatch};

const OUTBOUND_BILL_COLUMNS: &str = "id, customer_order_id, bill_date, due_date, \
     discount_cents, amount_paid_cents, payment_status";

pub struct OutboundBillRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> OutboundBillRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        OutboundBillRepository { conn }
    }

    /// Issues a bill for a customer order.
    ///
    /// ## Errors
    /// - `NotFound` if the customer order does not exist
    /// - `Domain` for a negative amount paid or an empty payment status
    pub async fn create(&mut self, input: &NewOutboundBill) -> DbResult<OutboundBill> {
        validate_non_negative("amount_paid_cents", input.amount_paid_cents)?;
        validate_name("payment_status", &input.payment_status)?;

        let order = CustomerOrderRepository::new(&mut *self.conn)
            .get_by_id(input.customer_order_id)
            .await?
            .ok_or_else(|| DbError::not_found("CustomerOrder", input.customer_order_id))?;

        let sql = format!(
            "INSERT INTO outbound_bills (customer_order_id, bill_date, due_date,
                                         discount_cents, amount_paid_cents, payment_status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {OUTBOUND_BILL_COLUMNS}"
        );
        let bill = sqlx::query_as::<_, OutboundBill>(&sql)
            .bind(order.id)
            .bind(input.bill_date)
            .bind(outbound_due_date(input.bill_date))
            .bind(order.discount_cents)
            .bind(input.amount_paid_cents)
            .bind(&input.payment_status)
            .fetch_one(&mut *self.conn)
            .await?;

        debug!(
            id = bill.id,
            customer_order_id = bill.customer_order_id,
            due_date = %bill.due_date,
            "Outbound bill issued"
        );
        Ok(bill)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<OutboundBill>> {
        let sql = format!("SELECT {OUTBOUND_BILL_COLUMNS} FROM outbound_bills WHERE id = ?1");
        let bill = sqlx::query_as::<_, OutboundBill>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(bill)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<OutboundBill>> {
        let sql = format!("SELECT {OUTBOUND_BILL_COLUMNS} FROM outbound_bills ORDER BY id");
        let bills = sqlx::query_as::<_, OutboundBill>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(bills)
    }

    pub async fn list_by_customer_order(
        &mut self,
        customer_order_id: i64,
    ) -> DbResult<Vec<OutboundBill>> {
        let sql = format!(
            "SELECT {OUTBOUND_BILL_COLUMNS} FROM outbound_bills
             WHERE customer_order_id = ?1 ORDER BY id"
        );
        let bills = sqlx::query_as::<_, OutboundBill>(&sql)
            .bind(customer_order_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(bills)
    }

    /// Replaces the amount paid and/or the payment status.
    pub async fn update(
        &mut self,
        id: i64,
        patch: OutboundBillPatch,
    ) -> DbResult<Option<OutboundBill>> {
        if let Some(paid) = patch.amount_paid_cents.as_set() {
            validate_non_negative("amount_paid_cents", *paid)?;
        }
        if let Some(status) = patch.payment_status.as_set() {
            validate_name("payment_status", status)?;
        }

        let Some(mut bill) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut bill);

        let sql = format!(
            "UPDATE outbound_bills SET amount_paid_cents = ?2, payment_status = ?3
             WHERE id = ?1
             RETURNING {OUTBOUND_BILL_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, OutboundBill>(&sql)
            .bind(id)
            .bind(bill.amount_paid_cents)
            .bind(&bill.payment_status)
            .fetch_optional(&mut *self.conn)
            .await?;

        debug!(id = id, "Outbound bill updated");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM outbound_bills WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Outbound bill delete");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;
    use crate::Session;
    use chrono::NaiveDate;
    use stockroom_core::{CustomerOrder, NewCustomerOrder, Patch};

    async fn premium_order(session: &mut Session) -> CustomerOrder {
        let category = test_support::category(session, "Toys").await;
        let product = test_support::product(session, category.id, 4_000, 5).await;
        let premium = test_support::membership(session, "premium").await;
        let customer = test_support::customer(session, Some(premium.id)).await;

        session
            .customer_orders()
            .create(&NewCustomerOrder {
                customer_id: customer.id,
                product_id: product.id,
                quantity: 1,
                shipping_address: "3 Pier Ln".to_string(),
            })
            .await
            .unwrap()
    }

    fn new_bill(order: &CustomerOrder) -> NewOutboundBill {
        NewOutboundBill {
            customer_order_id: order.id,
            bill_date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            amount_paid_cents: 0,
            payment_status: "Unpaid".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_copies_discount_and_sets_due_date() {
        let (_db, mut session) = test_support::session().await;
        let order = premium_order(&mut session).await;

        let bill = session
            .outbound_bills()
            .create(&new_bill(&order))
            .await
            .unwrap();

        assert_eq!(bill.customer_order_id, order.id);
        assert_eq!(bill.discount_cents, 1_000);
        assert_eq!(bill.bill_date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        // 2024 is a leap year
        assert_eq!(bill.due_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(bill.amount_paid_cents, 0);
        assert_eq!(bill.payment_status, "Unpaid");

        assert_eq!(
            session.outbound_bills().get_by_id(bill.id).await.unwrap(),
            Some(bill)
        );
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let (_db, mut session) = test_support::session().await;
        let mut order = premium_order(&mut session).await;
        order.id += 1;

        let result = session.outbound_bills().create(&new_bill(&order)).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_payment() {
        let (_db, mut session) = test_support::session().await;
        let order = premium_order(&mut session).await;
        let bill = session
            .outbound_bills()
            .create(&new_bill(&order))
            .await
            .unwrap();

        let patch = OutboundBillPatch {
            amount_paid_cents: Patch::Set(3_000),
            payment_status: Patch::Set("Paid".to_string()),
        };
        let updated = session
            .outbound_bills()
            .update(bill.id, patch)
            .await
            .unwrap()
            .unwrap();

        let mut expected = bill.clone();
        expected.amount_paid_cents = 3_000;
        expected.payment_status = "Paid".to_string();
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_list_by_order_and_cascade_delete() {
        let (_db, mut session) = test_support::session().await;
        let order = premium_order(&mut session).await;
        let first = session
            .outbound_bills()
            .create(&new_bill(&order))
            .await
            .unwrap();
        let second = session
            .outbound_bills()
            .create(&new_bill(&order))
            .await
            .unwrap();

        assert_eq!(
            session
                .outbound_bills()
                .list_by_customer_order(order.id)
                .await
                .unwrap(),
            vec![first.clone(), second]
        );

        assert!(session.outbound_bills().delete(first.id).await.unwrap());
        assert!(!session.outbound_bills().delete(first.id).await.unwrap());

        session.customer_orders().delete(order.id).await.unwrap();
        assert!(session.outbound_bills().list_all().await.unwrap().is_empty());
    }
}
