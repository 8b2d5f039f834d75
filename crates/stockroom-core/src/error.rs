//! # Domain Errors
//!
//! Failures that stockroom-core can detect without touching storage.
//!
//! ```text
//! ValidationError ──► CoreError::Validation
//!                          │
//! InsufficientStock ───────┤
//! InvalidPaymentAmount ────┤
//! AmountOverflow ──────────┤
//!                          ▼
//!           DbError::Domain (stockroom-db) ──► ApiError (stockroom-api)
//!                                                 VALIDATION_ERROR   422
//!                                                 INSUFFICIENT_STOCK 409
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A customer order asks for more units than are in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// createCustomerOrder (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: units_in_stock = 3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 12, available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Payment on an inbound bill is not acceptable.
    ///
    /// ## When This Occurs
    /// - Paying zero or a negative amount
    /// - Paying more than the bill's current amount due
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// `unit price × quantity` does not fit in an `i64` of cents.
    #[error("Order total overflows: {quantity} units at {unit_price_cents} cents")]
    AmountOverflow { unit_price_cents: i64, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field failed a format or range check. Raised before any write.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 12,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 12: available 3, requested 5"
        );

        let err = CoreError::InvalidPaymentAmount {
            reason: "payment exceeds amount due".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid payment amount: payment exceeds amount due"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "not an email address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "email has invalid format: not an email address"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
