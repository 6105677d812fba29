//! Transaction-related types for the personal ledger
//!
//! This module defines the transaction kinds and the immutable transaction
//! record appended to an account's history by every successful balance change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier
///
/// Allocated by the ledger, starting at 1001 unless configured otherwise.
pub type AccountNumber = u32;

/// Kinds of balance mutation recorded in an account history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit funds to an account
    ///
    /// Produced by deposits and by the receiving side of a transfer.
    Deposit,

    /// Debit funds from an account
    ///
    /// Produced by withdrawals and by the sending side of a transfer.
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// Immutable history entry
///
/// Only created by `Account` after the corresponding balance change succeeded,
/// so the amount is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Transaction { kind, amount }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::deposit(TransactionKind::Deposit, Decimal::new(500, 0), "Deposit: 500")]
    #[case::withdrawal(TransactionKind::Withdrawal, Decimal::new(12050, 2), "Withdrawal: 120.50")]
    fn test_transaction_display(
        #[case] kind: TransactionKind,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        let tx = Transaction::new(kind, amount);
        assert_eq!(tx.to_string(), expected);
        assert_eq!(tx.kind(), kind);
        assert_eq!(tx.amount(), amount);
    }
}
