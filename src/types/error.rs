//! Error types for the personal ledger
//!
//! This module defines all error types that can occur while operating on the
//! ledger. Errors are designed to be descriptive enough for the interactive shell
//! to turn them into user-facing messages.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Non-positive amounts
//! - **Business-Rule Failures**: Insufficient funds, unknown accounts, bad credentials
//! - **Arithmetic Errors**: Balance overflow, exhausted account numbers
//! - **Persistence Errors**: Snapshot I/O, malformed or inconsistent snapshot rows

use super::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

/// Main error type for the ledger
///
/// Business-rule variants are always recoverable: the operation that returned
/// them left every account untouched. Persistence variants are reported by the
/// ledger but never invalidate in-memory state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("Invalid amount '{amount}': amounts must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal or transfer exceeds the current balance
    ///
    /// The balance and transaction history remain unchanged.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: AccountNumber,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// No account exists with this number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account number that was looked up
        account: AccountNumber,
    },

    /// Transfer target does not exist
    ///
    /// Raised before any balance is touched.
    #[error("Recipient account {account} not found")]
    RecipientNotFound {
        /// The recipient account number
        account: AccountNumber,
    },

    /// Account number unknown or password mismatch
    ///
    /// Unknown numbers and wrong passwords both produce this variant.
    #[error("Invalid credentials for account {account}")]
    InvalidCredentials {
        /// The account number that was presented
        account: AccountNumber,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the balance exact.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: AccountNumber,
    },

    /// The account-number allocator has no numbers left
    #[error("No account numbers left to allocate")]
    AccountNumbersExhausted,

    /// I/O error occurred while reading or writing the snapshot
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Snapshot row could not be parsed
    #[error("Snapshot parse error{}: {message}", at_line(.line))]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Snapshot parsed but describes an impossible ledger
    #[error("Corrupt snapshot{}: {message}", at_line(.line))]
    CorruptSnapshot {
        /// Line number of the offending row (if available)
        line: Option<u64>,
        /// What was wrong with the row
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    pub fn insufficient_funds(account: AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    pub fn recipient_not_found(account: AccountNumber) -> Self {
        LedgerError::RecipientNotFound { account }
    }

    pub fn invalid_credentials(account: AccountNumber) -> Self {
        LedgerError::InvalidCredentials { account }
    }

    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn corrupt_snapshot(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::CorruptSnapshot {
            line,
            message: message.into(),
        }
    }

    /// True for failures caused by the snapshot medium rather than by the request
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            LedgerError::IoError { .. }
                | LedgerError::ParseError { .. }
                | LedgerError::CorruptSnapshot { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: Decimal::new(-5, 0) },
        "Invalid amount '-5': amounts must be greater than zero"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: 1001, balance: Decimal::new(5000, 2), requested: Decimal::new(100, 0) },
        "Insufficient funds in account 1001: balance 50.00, requested 100"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account: 42 },
        "Account 42 not found"
    )]
    #[case::recipient_not_found(
        LedgerError::RecipientNotFound { account: 9999 },
        "Recipient account 9999 not found"
    )]
    #[case::invalid_credentials(
        LedgerError::InvalidCredentials { account: 1001 },
        "Invalid credentials for account 1001"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account: 1001 },
        "Arithmetic overflow in deposit for account 1001"
    )]
    #[case::io_error(
        LedgerError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(7), message: "bad decimal".to_string() },
        "Snapshot parse error at line 7: bad decimal"
    )]
    #[case::corrupt_without_line(
        LedgerError::CorruptSnapshot { line: None, message: "duplicate account".to_string() },
        "Corrupt snapshot: duplicate account"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(1001, Decimal::ONE, Decimal::TEN),
        LedgerError::InsufficientFunds { account: 1001, balance: Decimal::ONE, requested: Decimal::TEN }
    )]
    #[case::recipient_not_found(
        LedgerError::recipient_not_found(7),
        LedgerError::RecipientNotFound { account: 7 }
    )]
    #[case::corrupt_snapshot(
        LedgerError::corrupt_snapshot(Some(3), "negative balance"),
        LedgerError::CorruptSnapshot { line: Some(3), message: "negative balance".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::io(LedgerError::IoError { message: String::new() }, true)]
    #[case::parse(LedgerError::parse_error(None, "x"), true)]
    #[case::corrupt(LedgerError::corrupt_snapshot(None, "x"), true)]
    #[case::business(LedgerError::account_not_found(1), false)]
    fn test_is_persistence(#[case] error: LedgerError, #[case] expected: bool) {
        assert_eq!(error.is_persistence(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
