//! Domain vocabulary shared by the API and the storage layer

use serde::{Deserialize, Serialize};

/// Kinds of money movement recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => "deposit".to_string(),
            TransactionKind::Withdrawal => "withdrawal".to_string(),
            TransactionKind::Transfer => "transfer".to_string(),
        }
    }
}

impl TryFrom<String> for TransactionKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(format!("Invalid transaction kind: {}", value)),
        }
    }
}

/// Which side of a ledger entry an account sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The account is the entry's source. Single-account movements
    /// (withdrawals, deposits) are recorded on the source side.
    Sent,
    /// The account is the entry's destination (transfers received).
    Received,
}

/// Loan lifecycle status
///
/// Issuance only ever produces approved loans; there is no decline or
/// repayment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Approved,
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        match status {
            LoanStatus::Approved => "approved".to_string(),
        }
    }
}

impl TryFrom<String> for LoanStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "approved" => Ok(LoanStatus::Approved),
            _ => Err(format!("Invalid loan status: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_kind_round_trips() {
        for kind in [
            TransactionKind::Deposit,
            TransactionKind::Withdrawal,
            TransactionKind::Transfer,
        ] {
            let stored = String::from(kind);
            assert_eq!(TransactionKind::try_from(stored).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(TransactionKind::try_from("wire".to_string()).is_err());
        assert!(LoanStatus::try_from("pending".to_string()).is_err());
    }
}
