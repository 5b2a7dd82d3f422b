//! Database layer: connection management and per-aggregate repositories

pub mod connection;
pub mod repositories;

pub use connection::initialize_database;
