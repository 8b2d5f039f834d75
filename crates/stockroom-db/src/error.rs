//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error ─────────────┐                                             │
//! │  MigrateError ────────────┼──► DbError ──► ApiError ──► HTTP response   │
//! │  CoreError / Validation ──┘                                             │
//! │                                                                         │
//! │  SQLite constraint messages are classified:                             │
//! │    "FOREIGN KEY constraint failed"  → ForeignKeyViolation               │
//! │    "CHECK constraint failed"        → CheckViolation                    │
//! │    "NOT NULL constraint failed"     → CheckViolation                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and caller feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// A row a write depends on does not exist.
    ///
    /// ## When This Occurs
    /// - Creating an order for a product or customer id that is absent
    /// - Paying an inbound bill that was deleted concurrently
    ///
    /// Plain lookups never produce this; they return `None`.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing a non-existent category, supplier, or membership
    /// - Deleting a row that other rows still reference
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    ///
    /// ## When This Occurs
    /// - A customer order would take `units_in_stock` below zero
    /// - Deleting a supplier order whose stock has already been sold
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// Input rejected by a domain rule before any SQL ran.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin, commit, or rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// True for errors caused by the data rather than the database being unavailable.
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            DbError::ForeignKeyViolation { .. } | DbError::CheckViolation { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed")
                    || msg.contains("NOT NULL constraint failed")
                {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Domain(CoreError::Validation(err))
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    #[tokio::test]
    async fn test_restricted_delete_is_foreign_key_violation() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Tools").await;
        test_support::product(&mut session, category.id, 500, 1).await;

        let err = session.categories().delete(category.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(err.is_constraint());
    }

    #[tokio::test]
    async fn test_negative_stock_is_check_violation() {
        let (_db, mut session) = test_support::session().await;
        let category = test_support::category(&mut session, "Tools").await;
        let product = test_support::product(&mut session, category.id, 500, 1).await;

        let err = session
            .products()
            .adjust_stock(product.id, -2)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
        assert!(err.is_constraint());
    }

    #[test]
    fn test_availability_errors_are_not_constraints() {
        assert!(!DbError::PoolExhausted.is_constraint());
        assert!(!DbError::not_found("Product", 3).is_constraint());
        assert!(!DbError::QueryFailed("UNIQUE constraint failed: x".to_string()).is_constraint());
    }
}
