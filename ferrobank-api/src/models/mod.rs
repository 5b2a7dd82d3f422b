//! Data models for accounts, ledger entries, loans, and reports

pub mod account;
pub mod ledger;
pub mod loan;
pub mod report;

pub use account::{Account, AccountProfile};
pub use ledger::LedgerEntry;
pub use loan::{InterestAccrual, Loan};
pub use report::Report;
