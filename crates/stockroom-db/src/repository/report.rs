//! # Report Repository
//!
//! Aggregates across order tables.
//!
//! ```text
//! most_sold_product    SUM(customer_orders.quantity) per product
//! most_bought_product  SUM(supplier_orders.quantity) per product
//!
//! ORDER BY total DESC, product_id ASC  → ties go to the lowest product id
//! ```

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::ProductRepository;
use stockroom_core::ProductVolume;

/// Order tables that can be ranked by summed quantity.
#[derive(Debug, Clone, Copy)]
enum OrderTable {
    Customer,
    Supplier,
}

impl OrderTable {
    fn name(self) -> &'static str {
        match self {
            OrderTable::Customer => "customer_orders",
            OrderTable::Supplier => "supplier_orders",
        }
    }
}

pub struct ReportRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ReportRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ReportRepository { conn }
    }

    /// Product with the greatest quantity sold to customers.
    /// `None` when there are no customer orders.
    pub async fn most_sold_product(&mut self) -> DbResult<Option<ProductVolume>> {
        self.top_product(OrderTable::Customer).await
    }

    /// Product with the greatest quantity bought from suppliers.
    /// `None` when there are no supplier orders.
    pub async fn most_bought_product(&mut self) -> DbResult<Option<ProductVolume>> {
        self.top_product(OrderTable::Supplier).await
    }

    async fn top_product(&mut self, table: OrderTable) -> DbResult<Option<ProductVolume>> {
        let sql = format!(
            "SELECT product_id, SUM(quantity) AS total_quantity
             FROM {}
             GROUP BY product_id
             ORDER BY total_quantity DESC, product_id ASC
             LIMIT 1",
            table.name()
        );
        let top = sqlx::query_as::<_, (i64, i64)>(&sql)
            .fetch_optional(&mut *self.conn)
            .await?;

        let Some((product_id, total_quantity)) = top else {
            return Ok(None);
        };

        // RESTRICT on the order tables keeps the product alive
        let product = ProductRepository::new(&mut *self.conn)
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", product_id))?;

        debug!(
            table = table.name(),
            product_id = product_id,
            total_quantity = total_quantity,
            "Top product by volume"
        );
        Ok(Some(ProductVolume {
            product,
            total_quantity,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support;
    use crate::Session;
    use stockroom_core::{Customer, NewCustomerOrder, NewSupplierOrder, Product, Supplier};

    async fn sell(session: &mut Session, customer: &Customer, product: &Product, quantity: i64) {
        session
            .customer_orders()
            .create(&NewCustomerOrder {
                customer_id: customer.id,
                product_id: product.id,
                quantity,
                shipping_address: "1 Main St".to_string(),
            })
            .await
            .unwrap();
    }

    async fn buy(session: &mut Session, supplier: &Supplier, product: &Product, quantity: i64) {
        session
            .supplier_orders()
            .create(&NewSupplierOrder {
                supplier_id: supplier.id,
                product_id: product.id,
                quantity,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_tables_have_no_top_product() {
        let (_db, mut session) = test_support::session().await;
        assert!(session.reports().most_sold_product().await.unwrap().is_none());
        assert!(session.reports().most_bought_product().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_most_sold_sums_across_orders() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Snacks").await;
        let chips = test_support::product(&mut session, category.id, 150, 50).await;
        let nuts = test_support::product(&mut session, category.id, 300, 50).await;
        let customer = test_support::customer(&mut session, None).await;

        sell(&mut session, &customer, &chips, 4).await;
        sell(&mut session, &customer, &nuts, 5).await;
        sell(&mut session, &customer, &chips, 3).await;

        let top = session.reports().most_sold_product().await.unwrap().unwrap();
        assert_eq!(top.product.id, chips.id);
        assert_eq!(top.total_quantity, 7);
    }

    #[tokio::test]
    async fn test_ties_go_to_lowest_product_id() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Snacks").await;
        let first = test_support::product(&mut session, category.id, 150, 50).await;
        let second = test_support::product(&mut session, category.id, 300, 50).await;
        let customer = test_support::customer(&mut session, None).await;
        let supplier = test_support::supplier(&mut session, category.id).await;

        sell(&mut session, &customer, &second, 6).await;
        sell(&mut session, &customer, &first, 6).await;
        buy(&mut session, &supplier, &second, 2).await;
        buy(&mut session, &supplier, &first, 2).await;

        let sold = session.reports().most_sold_product().await.unwrap().unwrap();
        assert_eq!(sold.product.id, first.id);

        let bought = session.reports().most_bought_product().await.unwrap().unwrap();
        assert_eq!(bought.product.id, first.id);
        assert_eq!(bought.total_quantity, 2);
    }

    #[tokio::test]
    async fn test_most_bought_ignores_sales() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Snacks").await;
        let popular = test_support::product(&mut session, category.id, 150, 50).await;
        let restocked = test_support::product(&mut session, category.id, 300, 0).await;
        let customer = test_support::customer(&mut session, None).await;
        let supplier = test_support::supplier(&mut session, category.id).await;

        sell(&mut session, &customer, &popular, 20).await;
        buy(&mut session, &supplier, &restocked, 9).await;
        buy(&mut session, &supplier, &popular, 1).await;

        let bought = session.reports().most_bought_product().await.unwrap().unwrap();
        assert_eq!(bought.product.id, restocked.id);
        assert_eq!(bought.total_quantity, 9);
    }
}
