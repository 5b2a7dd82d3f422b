//! Error types for the core banking library

use thiserror::Error;

/// Custom error type for core banking operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for core banking operations
pub type Result<T> = std::result::Result<T, Error>;
