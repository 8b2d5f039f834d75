//! # Supplier Order Repository
//!
//! Purchases from suppliers, with their stock and billing side effects.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(NewSupplierOrder { supplier_id, product_id, quantity })         │
//! │       │                                                                 │
//! │       ├── validate quantity > 0                                         │
//! │       ├── load product ─────────────── missing → NotFound               │
//! │       ├── total = unit_price × quantity                                 │
//! │       ├── INSERT supplier_orders                                        │
//! │       │     order_date = today, expected_delivery = today + 5           │
//! │       ├── products.adjust_stock(+quantity)                              │
//! │       └── inbound_bills.create                                          │
//! │             bill_date = order_date                                      │
//! │             due_date  = expected_delivery + 5                           │
//! │             amount_due = total, status Pending                          │
//! │                                                                         │
//! │  All on the session's connection: one commit or one rollback.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{InboundBillRepository, ProductRepository};
use stockroom_core::billing::{expected_delivery_date, inbound_due_date};
use stockroom_core::pricing::order_total;
use stockroom_core::validation::validate_quantity;
use stockroom_core::{NewInboundBill, NewSupplierOrder, SupplierOrder, SupplierOrderPatch};

const SUPPLIER_ORDER_COLUMNS: &str = "id, supplier_id, product_id, order_date, \
     expected_delivery_date, quantity, total_amount_cents";

pub struct SupplierOrderRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SupplierOrderRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        SupplierOrderRepository { conn }
    }

    /// Places an order dated today. See the module docs for side effects.
    pub async fn create(&mut self, input: &NewSupplierOrder) -> DbResult<SupplierOrder> {
        self.create_dated(input, Local::now().date_naive()).await
    }

    /// Places an order with an explicit order date.
    ///
    /// ## Errors
    /// - `Domain` if quantity is not positive or the total overflows
    /// - `NotFound` if the product does not exist
    /// - `ForeignKeyViolation` if the supplier does not exist
    pub async fn create_dated(
        &mut self,
        input: &NewSupplierOrder,
        order_date: NaiveDate,
    ) -> DbResult<SupplierOrder> {
        validate_quantity(input.quantity)?;

        let product = ProductRepository::new(&mut *self.conn)
            .get_by_id(input.product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", input.product_id))?;

        let total = order_total(product.unit_price(), input.quantity)?;
        let expected_delivery = expected_delivery_date(order_date);

        let sql = format!(
            "INSERT INTO supplier_orders (supplier_id, product_id, order_date,
                                          expected_delivery_date, quantity, total_amount_cents)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {SUPPLIER_ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, SupplierOrder>(&sql)
            .bind(input.supplier_id)
            .bind(input.product_id)
            .bind(order_date)
            .bind(expected_delivery)
            .bind(input.quantity)
            .bind(total.cents())
            .fetch_one(&mut *self.conn)
            .await?;

        ProductRepository::new(&mut *self.conn)
            .adjust_stock(order.product_id, order.quantity)
            .await?;

        let bill = InboundBillRepository::new(&mut *self.conn)
            .create(&NewInboundBill {
                supplier_order_id: order.id,
                bill_date: order.order_date,
                due_date: inbound_due_date(order.expected_delivery_date),
                amount_due_cents: order.total_amount_cents,
            })
            .await?;

        info!(
            id = order.id,
            product_id = order.product_id,
            quantity = order.quantity,
            total = %total,
            inbound_bill_id = bill.id,
            "Supplier order placed"
        );
        Ok(order)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<SupplierOrder>> {
        let sql = format!("SELECT {SUPPLIER_ORDER_COLUMNS} FROM supplier_orders WHERE id = ?1");
        let order = sqlx::query_as::<_, SupplierOrder>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(order)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<SupplierOrder>> {
        let sql = format!("SELECT {SUPPLIER_ORDER_COLUMNS} FROM supplier_orders ORDER BY id");
        let orders = sqlx::query_as::<_, SupplierOrder>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = orders.len(), "Listed supplier orders");
        Ok(orders)
    }

    /// Name of the supplier an order was placed with.
    pub async fn supplier_name(&mut self, order_id: i64) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT s.name FROM supplier_orders o
             JOIN suppliers s ON s.id = o.supplier_id
             WHERE o.id = ?1",
        )
        .bind(order_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(name)
    }

    /// Name of the product an order is for.
    pub async fn product_name(&mut self, order_id: i64) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT p.name FROM supplier_orders o
             JOIN products p ON p.id = o.product_id
             WHERE o.id = ?1",
        )
        .bind(order_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(name)
    }

    /// Applies `patch`. Returns `None` when the order does not exist.
    ///
    /// A quantity change moves stock by the difference; a new expected
    /// delivery date moves the due date of the order's inbound bills.
    /// Order and bill amounts stay as priced at order time.
    pub async fn update(
        &mut self,
        id: i64,
        patch: SupplierOrderPatch,
    ) -> DbResult<Option<SupplierOrder>> {
        if let Some(quantity) = patch.quantity.as_set() {
            validate_quantity(*quantity)?;
        }

        let Some(mut order) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let old_quantity = order.quantity;
        let old_delivery = order.expected_delivery_date;
        patch.apply_to(&mut order);

        let sql = format!(
            "UPDATE supplier_orders SET quantity = ?2, expected_delivery_date = ?3
             WHERE id = ?1
             RETURNING {SUPPLIER_ORDER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SupplierOrder>(&sql)
            .bind(id)
            .bind(order.quantity)
            .bind(order.expected_delivery_date)
            .fetch_one(&mut *self.conn)
            .await?;

        let delta = updated.quantity - old_quantity;
        if delta != 0 {
            ProductRepository::new(&mut *self.conn)
                .adjust_stock(updated.product_id, delta)
                .await?;
        }

        if updated.expected_delivery_date != old_delivery {
            InboundBillRepository::new(&mut *self.conn)
                .reschedule_for_order(id, inbound_due_date(updated.expected_delivery_date))
                .await?;
        }

        debug!(id = id, stock_delta = delta, "Supplier order updated");
        Ok(Some(updated))
    }

    /// Deletes an order, first taking its quantity back out of stock.
    /// Its inbound bills are removed by the cascade.
    ///
    /// Fails with `CheckViolation` when the delivered units have already
    /// been sold, since stock would go negative.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(false);
        };

        ProductRepository::new(&mut *self.conn)
            .adjust_stock(order.product_id, -order.quantity)
            .await?;

        let result = sqlx::query("DELETE FROM supplier_orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        info!(id = id, product_id = order.product_id, "Supplier order deleted");
        Ok(result.rows_affected() > 0)
    }
}
