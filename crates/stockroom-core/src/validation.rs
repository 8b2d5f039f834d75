//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API resolver                                                  │
//! │  ├── Type validation (serde deserialization)                           │
//! │  └── Customer email / contact number format                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (before SQL)                                      │
//! │  └── THIS MODULE: names, quantities, prices                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints (stock never negative)               │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_email("orders@acme.io").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::{CustomerPatch, NewCustomer, NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name for any entity.
pub const MAX_NAME_LENGTH: usize = 200;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

static CONTACT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("contact pattern is a valid regex"));

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (category, supplier, product, customer).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_email;
///
/// assert!(validate_email("jane.doe+shop@example.co").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: format!("'{}' is not a valid email address", email),
        })
    }
}

/// Validates a contact number: exactly 10 ASCII digits.
pub fn validate_contact_number(number: &str) -> ValidationResult<()> {
    if CONTACT_NUMBER_PATTERN.is_match(number) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "contact_number".to_string(),
            reason: "must be exactly 10 digits".to_string(),
        })
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a price or money amount in cents.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_non_negative("unit_price_cents", cents)
}

pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Checks a new customer's name, email, and contact number.
pub fn validate_new_customer(input: &NewCustomer) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_email(&input.email)?;
    validate_contact_number(&input.contact_number)
}

/// Checks only the fields a customer update supplies.
pub fn validate_customer_patch(patch: &CustomerPatch) -> ValidationResult<()> {
    if let Some(name) = patch.name.as_set() {
        validate_name("name", name)?;
    }
    if let Some(email) = patch.email.as_set() {
        validate_email(email)?;
    }
    if let Some(number) = patch.contact_number.as_set() {
        validate_contact_number(number)?;
    }
    Ok(())
}

pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_price_cents(input.unit_price_cents)?;
    validate_non_negative("units_in_stock", input.units_in_stock)?;
    validate_non_negative("units_on_order", input.units_on_order)?;
    validate_non_negative("reorder_level", input.reorder_level)
}

pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = patch.name.as_set() {
        validate_name("name", name)?;
    }
    if let Some(price) = patch.unit_price_cents.as_set() {
        validate_price_cents(*price)?;
    }
    if let Some(stock) = patch.units_in_stock.as_set() {
        validate_non_negative("units_in_stock", *stock)?;
    }
    if let Some(on_order) = patch.units_on_order.as_set() {
        validate_non_negative("units_on_order", *on_order)?;
    }
    if let Some(level) = patch.reorder_level.as_set() {
        validate_non_negative("reorder_level", *level)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
