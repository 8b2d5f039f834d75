//! # Category Repository
//!
//! Database operations for categories.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_name;
use stockroom_core::{Category, CategoryPatch, NewCategory};

/// Repository for category database operations.
pub struct CategoryRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CategoryRepository<'c> {
    /// Creates a new CategoryRepository on a session's connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        CategoryRepository { conn }
    }

    /// Inserts a category. The name is stored exactly as given.
    pub async fn create(&mut self, input: &NewCategory) -> DbResult<Category> {
        validate_name("name", &input.name)?;

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES (?1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&mut *self.conn)
        .await?;

        debug!(id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(category)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Applies `patch`. Returns `None` when the category does not exist.
    pub async fn update(&mut self, id: i64, patch: CategoryPatch) -> DbResult<Option<Category>> {
        if let Some(name) = patch.name.as_set() {
            validate_name("name", name)?;
        }

        let Some(mut category) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut category);

        let updated = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?2 WHERE id = ?1 RETURNING id, name",
        )
        .bind(id)
        .bind(&category.name)
        .fetch_optional(&mut *self.conn)
        .await?;

        debug!(id = id, "Category updated");
        Ok(updated)
    }

    /// Deletes a category. Fails with a foreign-key violation while products
    /// or suppliers still reference it.
    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Category delete");
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
    async fn test_create_then_get() {
        let (_db, mut session) = test_support::session().await;

        let created = test_support::category(&mut session, "  Beverages ").await;
        assert_eq!(created.name, "  Beverages ");

        let fetched = session.categories().get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let (_db, mut session) = test_support::session().await;

        let result = session
            .categories()
            .create(&NewCategory {
                name: "   ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(DbError::Domain(_))));
        assert!(session.categories().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_missing_id() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Snacks").await;

        let patch = CategoryPatch {
            name: Patch::Set("Savory Snacks".to_string()),
        };
        let updated = session
            .categories()
            .update(category.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Savory Snacks");

        let missing = session
            .categories()
            .update(999, CategoryPatch::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Dairy").await;

        assert!(session.categories().delete(category.id).await.unwrap());
        assert!(session
            .categories()
            .get_by_id(category.id)
            .await
            .unwrap()
            .is_none());
        assert!(!session.categories().delete(category.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_referenced_category_fails() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Frozen").await;
        test_support::product(&mut session, category.id, 100, 1).await;

        let result = session.categories().delete(category.id).await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }
}
