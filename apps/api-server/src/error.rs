//! # API Error Type
//!
//! Unified error type for operation resolvers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  POST /api { "operation": "createCustomerOrder", ... }                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Resolver  → Result<T, ApiError>                                 │  │
//! │  │         │                                                        │  │
//! │  │  Body not JSON / unknown op? ─── JsonRejection ──────┐           │  │
//! │  │  Validation failed?  ─────────── ValidationError ────┤           │  │
//! │  │  Not enough stock?   ─────────── CoreError ──────────┤           │  │
//! │  │  Constraint / connection? ────── DbError ────────────┴─► ApiError│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼  session rolled back                                          │
//! │  HTTP 4xx/5xx  { "error": { "code": "NOT_FOUND", "message": "..." } }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// Error returned from `POST /api`.
///
/// ## Serialization
/// ```json
/// {
///   "error": {
///     "code": "NOT_FOUND",
///     "message": "Product not found: 12"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A row the operation depends on does not exist (404)
    NotFound,

    /// Input validation failed (422)
    ValidationError,

    /// A database constraint rejected the write (409)
    ConstraintViolation,

    /// Not enough units in stock (409)
    InsufficientStock,

    /// Malformed request body or unknown operation (400)
    BadRequest,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ConstraintViolation | ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a ApiError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        (status, Json(ErrorBody { error: &self })).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Domain(core) => ApiError::from(core),
            err @ (DbError::ForeignKeyViolation { .. } | DbError::CheckViolation { .. }) => {
                tracing::warn!(error = %err, "Constraint rejected write");
                ApiError::new(ErrorCode::ConstraintViolation, err.to_string())
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::InvalidPaymentAmount { .. } | CoreError::AmountOverflow { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Malformed JSON, a missing `operation`, or an unknown operation name.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::BadRequest, rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to serialize response: {}", err))
    }
}

/// Result type for resolvers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_codes() {
        let cases = [
            (DbError::not_found("Product", 7), ErrorCode::NotFound),
            (
                DbError::ForeignKeyViolation {
                    message: "FOREIGN KEY constraint failed".to_string(),
                },
                ErrorCode::ConstraintViolation,
            ),
            (
                DbError::CheckViolation {
                    message: "CHECK constraint failed".to_string(),
                },
                ErrorCode::ConstraintViolation,
            ),
            (DbError::PoolExhausted, ErrorCode::DatabaseError),
            (
                DbError::Domain(CoreError::InsufficientStock {
                    product_id: 1,
                    available: 0,
                    requested: 2,
                }),
                ErrorCode::InsufficientStock,
            ),
            (
                DbError::Domain(CoreError::AmountOverflow {
                    unit_price_cents: i64::MAX,
                    quantity: 2,
                }),
                ErrorCode::ValidationError,
            ),
            (
                DbError::from(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }),
                ErrorCode::ValidationError,
            ),
        ];

        for (db_error, code) in cases {
            assert_eq!(ApiError::from(db_error).code, code);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::from(DbError::not_found("Customer", 9));
        assert_eq!(err.message, "Customer not found: 9");
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_codes_serialize_screaming_snake() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::ConstraintViolation, "x")).unwrap();
        assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
        assert_eq!(json["message"], "x");
    }

    #[test]
    fn test_statuses() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ErrorCode::InsufficientStock.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
