//! # Supplier Repository
//!
//! Database operations for suppliers, including the name and category
//! lookups used by the query API.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_name;
use stockroom_core::{NewSupplier, Supplier, SupplierPatch};

const SUPPLIER_COLUMNS: &str =
    "id, name, contact_person, contact_number, email, address, category_id";

/// Repository for supplier database operations.
pub struct SupplierRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SupplierRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        SupplierRepository { conn }
    }

    /// Inserts a supplier. The category must exist (foreign-key violation otherwise).
    pub async fn create(&mut self, input: &NewSupplier) -> DbResult<Supplier> {
        validate_name("name", &input.name)?;

        let sql = format!(
            "INSERT INTO suppliers (name, contact_person, contact_number, email, address, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {SUPPLIER_COLUMNS}"
        );
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(&input.name)
            .bind(&input.contact_person)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .bind(input.category_id)
            .fetch_one(&mut *self.conn)
            .await?;

        debug!(id = supplier.id, name = %supplier.name, "Supplier created");
        Ok(supplier)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(supplier)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY id");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = suppliers.len(), "Listed suppliers");
        Ok(suppliers)
    }

    /// Suppliers whose name matches exactly.
    pub async fn list_by_name(&mut self, name: &str) -> DbResult<Vec<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE name = ?1 ORDER BY id");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .bind(name)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(name = %name, count = suppliers.len(), "Suppliers by name");
        Ok(suppliers)
    }

    pub async fn list_by_category(&mut self, category_id: i64) -> DbResult<Vec<Supplier>> {
        let sql =
            format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE category_id = ?1 ORDER BY id");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .bind(category_id)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(suppliers)
    }

    /// Applies `patch`. Returns `None` when the supplier does not exist.
    pub async fn update(&mut self, id: i64, patch: SupplierPatch) -> DbResult<Option<Supplier>> {
        if let Some(name) = patch.name.as_set() {
            validate_name("name", name)?;
        }

        let Some(mut supplier) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut supplier);

        let sql = format!(
            "UPDATE suppliers
             SET name = ?2, contact_person = ?3, contact_number = ?4, email = ?5,
                 address = ?6, category_id = ?7
             WHERE id = ?1
             RETURNING {SUPPLIER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .bind(&supplier.name)
            .bind(&supplier.contact_person)
            .bind(&supplier.contact_number)
            .bind(&supplier.email)
            .bind(&supplier.address)
            .bind(supplier.category_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        debug!(id = id, "Supplier updated");
        Ok(updated)
    }

    /// Deletes a supplier. Fails while supplier orders still reference it.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Supplier delete");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::test_support;
    use stockroom_core::Patch;

    #[tokio::test]
    async fn test_create_then_get_matches_input() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Beverages").await;

        let supplier = test_support::supplier(&mut session, category.id).await;
        let fetched = session
            .suppliers()
            .get_by_id(supplier.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.name, "Acme Wholesale");
        assert_eq!(fetched.contact_person.as_deref(), Some("Ann"));
        assert_eq!(fetched.contact_number.as_deref(), Some("0123456789"));
        assert_eq!(fetched.email.as_deref(), Some("sales@acme.io"));
        assert_eq!(fetched.address, None);
        assert_eq!(fetched.category_id, category.id);
    }

    #[tokio::test]
    async fn test_missing_category_is_rejected() {
        let (_db, mut session) = test_support::session().await;

        let result = session
            .suppliers()
            .create(&NewSupplier {
                name: "Orphan".to_string(),
                contact_person: None,
                contact_number: None,
                email: None,
                address: None,
                category_id: 42,
            })
            .await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[tokio::test]
    async fn test_update_single_field_keeps_others() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Beverages").await;
        let supplier = test_support::supplier(&mut session, category.id).await;

        let patch = SupplierPatch {
            email: Patch::Set(Some("orders@acme.io".to_string())),
            ..Default::default()
        };
        let updated = session
            .suppliers()
            .update(supplier.id, patch)
            .await
            .unwrap()
            .unwrap();

        let mut expected = supplier.clone();
        expected.email = Some("orders@acme.io".to_string());
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_update_can_clear_nullable_field() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Beverages").await;
        let supplier = test_support::supplier(&mut session, category.id).await;

        let patch = SupplierPatch {
            contact_person: Patch::Set(None),
            ..Default::default()
        };
        let updated = session
            .suppliers()
            .update(supplier.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.contact_person, None);
        assert_eq!(updated.name, supplier.name);
    }

    #[tokio::test]
    async fn test_lookups_by_name_and_category() {
        let (_db, mut session) = test_support::session().await;
        let drinks = test_support::category(&mut session, "Beverages").await;
        let snacks = test_support::category(&mut session, "Snacks").await;
        let first = test_support::supplier(&mut session, drinks.id).await;
        let second = test_support::supplier(&mut session, snacks.id).await;

        let by_name = session
            .suppliers()
            .list_by_name("Acme Wholesale")
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);
        assert!(session
            .suppliers()
            .list_by_name("acme wholesale")
            .await
            .unwrap()
            .is_empty());

        let by_category = session.suppliers().list_by_category(snacks.id).await.unwrap();
        assert_eq!(by_category, vec![second]);
        assert_ne!(by_category[0].id, first.id);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Beverages").await;
        let supplier = test_support::supplier(&mut session, category.id).await;

        assert!(session.suppliers().delete(supplier.id).await.unwrap());
        assert!(session
            .suppliers()
            .get_by_id(supplier.id)
            .await
            .unwrap()
            .is_none());
        assert!(!session.suppliers().delete(supplier.id).await.unwrap());
    }
}
