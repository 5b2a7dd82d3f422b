//! HTTP service implementations

pub mod account;
pub mod auth;
pub mod health;
pub mod loan;
pub mod report;
pub mod transaction;

#[cfg(test)]
pub mod auth_test;
