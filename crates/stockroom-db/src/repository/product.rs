//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Category and reorder-level listings
//! - Stock adjustments used by the order repositories
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      units_in_stock                                     │
//! │                                                                         │
//! │  SupplierOrder create  ──► adjust_stock(+qty)                           │
//! │  SupplierOrder update  ──► adjust_stock(new - old)                      │
//! │  SupplierOrder delete  ──► adjust_stock(-qty)                           │
//! │                                                                         │
//! │  CustomerOrder create  ──► adjust_stock(-qty)                           │
//! │  CustomerOrder update  ──► adjust_stock(old - new)                      │
//! │  CustomerOrder delete  ──► adjust_stock(+qty)                           │
//! │                                                                         │
//! │  CHECK (units_in_stock >= 0) rejects any adjustment that would go       │
//! │  negative; the whole session is then rolled back.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::validation::{validate_new_product, validate_product_patch};
use stockroom_core::{NewProduct, Product, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, description, category_id, unit_price_cents, \
     units_in_stock, units_on_order, reorder_level, discontinued";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let mut session = db.begin().await?;
///
/// let product = session.products().get_by_id(7).await?;
/// let restocked = session.products().adjust_stock(7, 24).await?;
/// ```
pub struct ProductRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ProductRepository<'c> {
    /// Creates a new ProductRepository on a session's connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ProductRepository { conn }
    }

    /// Inserts a product.
    ///
    /// ## Errors
    /// - `Domain` for an empty name or negative price/stock figures
    /// - `ForeignKeyViolation` when the category does not exist
    pub async fn create(&mut self, input: &NewProduct) -> DbResult<Product> {
        validate_new_product(input)?;

        let sql = format!(
            "INSERT INTO products (name, description, category_id, unit_price_cents,
                                   units_in_stock, units_on_order, reorder_level, discontinued)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.unit_price_cents)
            .bind(input.units_in_stock)
            .bind(input.units_on_order)
            .bind(input.reorder_level)
            .bind(input.discontinued)
            .fetch_one(&mut *self.conn)
            .await?;

        debug!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(product)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn list_by_category(&mut self, category_id: i64) -> DbResult<Vec<Product>> {
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = ?1 ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category_id)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(category_id = category_id, count = products.len(), "Products by category");
        Ok(products)
    }

    /// Products still being sold whose stock is at or below their reorder level.
    pub async fn list_below_reorder_level(&mut self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE discontinued = 0 AND units_in_stock <= reorder_level
             ORDER BY units_in_stock, id"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = products.len(), "Products at reorder level");
        Ok(products)
    }

    /// Applies `patch`. Returns `None` when the product does not exist.
    pub async fn update(&mut self, id: i64, patch: ProductPatch) -> DbResult<Option<Product>> {
        validate_product_patch(&patch)?;

        let Some(mut product) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut product);

        let sql = format!(
            "UPDATE products
             SET name = ?2, description = ?3, category_id = ?4, unit_price_cents = ?5,
                 units_in_stock = ?6, units_on_order = ?7, reorder_level = ?8, discontinued = ?9
             WHERE id = ?1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category_id)
            .bind(product.unit_price_cents)
            .bind(product.units_in_stock)
            .bind(product.units_on_order)
            .bind(product.reorder_level)
            .bind(product.discontinued)
            .fetch_optional(&mut *self.conn)
            .await?;

        debug!(id = id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product. Fails while orders still reference it.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Product delete");
        Ok(result.rows_affected() > 0)
    }

    /// Adds `delta` (positive or negative) to `units_in_stock`.
    ///
    /// ## Errors
    /// - `NotFound` if the product does not exist
    /// - `CheckViolation` if stock would drop below zero
    pub async fn adjust_stock(&mut self, id: i64, delta: i64) -> DbResult<Product> {
        let sql = format!(
            "UPDATE products SET units_in_stock = units_in_stock + ?2
             WHERE id = ?1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(delta)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        debug!(
            id = id,
            delta = delta,
            units_in_stock = product.units_in_stock,
            "Stock adjusted"
        );
        Ok(product)
    }
}
