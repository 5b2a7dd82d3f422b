//! Ferrobank Core - banking domain primitives
//!
//! This library provides the domain building blocks shared by the HTTP API:
//! decimal money handling, the account/transaction/loan vocabulary, and the
//! interest accrual rules applied to overdue loans.

pub mod error;
pub mod interest;
pub mod money;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
