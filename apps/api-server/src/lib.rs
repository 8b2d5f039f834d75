//! # stockroom-api
//!
//! HTTP front end for the stock management service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom API Server                             │
//! │                                                                         │
//! │  Client ───► POST /api ───► Operation ───► resolver ───► Session        │
//! │                                              │              │           │
//! │                                     query / mutation        ▼           │
//! │                                                          SQLite         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment configuration
//! - [`routes`] - axum router and handlers
//! - [`api`] - Operation envelope, resolvers, DTOs
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
