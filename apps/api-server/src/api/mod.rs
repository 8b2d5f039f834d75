//! # Operation API
//!
//! - [`operation`] - the typed request envelope
//! - [`resolver`] - session lifecycle and dispatch
//! - [`query`] / [`mutation`] - one resolver per operation
//! - [`dto`] - response shapes

pub mod dto;
pub mod mutation;
pub mod operation;
pub mod query;
pub mod resolver;

pub use operation::Operation;
pub use resolver::execute;
