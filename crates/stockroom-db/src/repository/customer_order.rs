//! # Customer Order Repository
//!
//! Sales to customers. Creating an order prices it against the customer's
//! membership tier and takes the quantity out of stock.
//!
//! ## Create Flow
//! ```text
//! create(NewCustomerOrder)
//!   ├── validate quantity > 0
//!   ├── load product ──────────── missing → NotFound
//!   ├── customer membership type ─ missing customer → NotFound
//!   ├── product.ensure_stock(qty) ─ short → InsufficientStock
//!   ├── price_customer_order(unit_price, qty, tier)
//!   │     premium 25% │ classic 5% │ anything else 0%
//!   ├── INSERT customer_orders (total net of discount)
//!   └── products.adjust_stock(-qty)
//! ```
//!
//! No outbound bill is opened automatically; bills are issued explicitly.

use chrono::{Local, NaiveDate};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{CustomerRepository, ProductRepository};
use stockroom_core::pricing::price_customer_order;
use stockroom_core::validation::{validate_name, validate_quantity};
use stockroom_core::{CustomerOrder, CustomerOrderPatch, NewCustomerOrder};

const CUSTOMER_ORDER_COLUMNS: &str = "id, customer_id, product_id, order_date, \
     shipping_address, quantity, total_amount_cents, discount_cents";

pub struct CustomerOrderRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CustomerOrderRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        CustomerOrderRepository { conn }
    }

    /// Places an order dated today.
    pub async fn create(&mut self, input: &NewCustomerOrder) -> DbResult<CustomerOrder> {
        self.create_dated(input, Local::now().date_naive()).await
    }

    /// Places an order with an explicit order date.
    ///
    /// ## Errors
    /// - `Domain` for a non-positive quantity, an empty shipping address,
    ///   not enough stock, or a total that overflows
    /// - `NotFound` if the product or the customer does not exist
    pub async fn create_dated(
        &mut self,
        input: &NewCustomerOrder,
        order_date: NaiveDate,
    ) -> DbResult<CustomerOrder> {
        validate_quantity(input.quantity)?;
        validate_name("shipping_address", &input.shipping_address)?;

        let product = ProductRepository::new(&mut *self.conn)
            .get_by_id(input.product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", input.product_id))?;

        let membership_type = CustomerRepository::new(&mut *self.conn)
            .membership_type(input.customer_id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", input.customer_id))?;

        product.ensure_stock(input.quantity)?;

        let pricing =
            price_customer_order(product.unit_price(), input.quantity, membership_type.as_deref())?;

        let sql = format!(
            "INSERT INTO customer_orders (customer_id, product_id, order_date, shipping_address,
                                          quantity, total_amount_cents, discount_cents)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {CUSTOMER_ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, CustomerOrder>(&sql)
            .bind(input.customer_id)
            .bind(input.product_id)
            .bind(order_date)
            .bind(&input.shipping_address)
            .bind(input.quantity)
            .bind(pricing.total.cents())
            .bind(pricing.discount.cents())
            .fetch_one(&mut *self.conn)
            .await?;

        ProductRepository::new(&mut *self.conn)
            .adjust_stock(order.product_id, -order.quantity)
            .await?;

        info!(
            id = order.id,
            customer_id = order.customer_id,
            product_id = order.product_id,
            quantity = order.quantity,
            gross = %pricing.gross,
            discount = %pricing.discount,
            total = %pricing.total,
            "Customer order placed"
        );
        Ok(order)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<CustomerOrder>> {
        let sql = format!("SELECT {CUSTOMER_ORDER_COLUMNS} FROM customer_orders WHERE id = ?1");
        let order = sqlx::query_as::<_, CustomerOrder>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(order)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<CustomerOrder>> {
        let sql = format!("SELECT {CUSTOMER_ORDER_COLUMNS} FROM customer_orders ORDER BY id");
        let orders = sqlx::query_as::<_, CustomerOrder>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = orders.len(), "Listed customer orders");
        Ok(orders)
    }

    pub async fn list_by_customer(&mut self, customer_id: i64) -> DbResult<Vec<CustomerOrder>> {
        let sql = format!(
            "SELECT {CUSTOMER_ORDER_COLUMNS} FROM customer_orders
             WHERE customer_id = ?1 ORDER BY id"
        );
        let orders = sqlx::query_as::<_, CustomerOrder>(&sql)
            .bind(customer_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(orders)
    }

    /// Applies `patch`. Returns `None` when the order does not exist.
    ///
    /// A quantity change moves stock the opposite way: ordering more takes
    /// more out of stock (and needs it to be there), ordering less puts
    /// units back. Amounts stay as priced at order time.
    pub async fn update(
        &mut self,
        id: i64,
        patch: CustomerOrderPatch,
    ) -> DbResult<Option<CustomerOrder>> {
        if let Some(quantity) = patch.quantity.as_set() {
            validate_quantity(*quantity)?;
        }
        if let Some(address) = patch.shipping_address.as_set() {
            validate_name("shipping_address", address)?;
        }

        let Some(mut order) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let old_quantity = order.quantity;
        patch.apply_to(&mut order);

        let extra = order.quantity - old_quantity;
        if extra > 0 {
            let product = ProductRepository::new(&mut *self.conn)
                .get_by_id(order.product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", order.product_id))?;
            product.ensure_stock(extra)?;
        }

        let sql = format!(
            "UPDATE customer_orders SET shipping_address = ?2, quantity = ?3
             WHERE id = ?1
             RETURNING {CUSTOMER_ORDER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, CustomerOrder>(&sql)
            .bind(id)
            .bind(&order.shipping_address)
            .bind(order.quantity)
            .fetch_one(&mut *self.conn)
            .await?;

        if extra != 0 {
            ProductRepository::new(&mut *self.conn)
                .adjust_stock(updated.product_id, -extra)
                .await?;
        }

        debug!(id = id, stock_delta = -extra, "Customer order updated");
        Ok(Some(updated))
    }

    /// Deletes an order and puts its quantity back into stock.
    /// Its outbound bills are removed by the cascade.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(false);
        };

        ProductRepository::new(&mut *self.conn)
            .adjust_stock(order.product_id, order.quantity)
            .await?;

        let result = sqlx::query("DELETE FROM customer_orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        info!(id = id, product_id = order.product_id, "Customer order deleted");
        Ok(result.rows_affected() > 0)
    }
}
