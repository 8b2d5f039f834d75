//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate holds the domain model of the stock-management back end and
//! every calculation that does not need a database: order totals, membership
//! discounts, bill due dates, payment application, and input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP clients                                 │   │
//! │  │    { "operation": "createSupplierOrder", "input": {...} }       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ POST /api                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockroom-api (resolvers)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  billing  │  │   patch   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │          SQLite sessions, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities, create inputs, and partial-update patches
//! - [`money`] - `Money`, integer cents
//! - [`patch`] - `Patch<T>`: present/absent wrapper for update fields
//! - [`pricing`] - Membership tiers and customer order pricing
//! - [`billing`] - Delivery and due-date offsets, inbound bill payments
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//! use stockroom_core::pricing::price_customer_order;
//!
//! // 4 units at $25.00 for a premium member
//! let pricing = price_customer_order(Money::from_cents(2500), 4, Some("premium")).unwrap();
//!
//! assert_eq!(pricing.discount.cents(), 2500);
//! assert_eq!(pricing.total.cents(), 7500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod patch;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use patch::Patch;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Membership type assigned when a membership is created without one.
pub const DEFAULT_MEMBERSHIP_TYPE: &str = "classic";
