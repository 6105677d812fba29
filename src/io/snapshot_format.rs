//! CSV format handling for ledger snapshots
//!
//! This module centralizes the snapshot format, providing:
//! - SnapshotRow structure for (de)serialization
//! - Conversion from accounts to rows and back, with invariant checks
//!
//! All functions operate on `Read`/`Write` (no file handling) for easy testing.
//!
//! # Layout
//!
//! ```text
//! record,account,name,email,phone,password,balance,kind,amount
//! account,1001,Alice,alice@example.com,555-0100,secret,300,,
//! transaction,1001,,,,,,deposit,500
//! transaction,1001,,,,,,withdrawal,200
//! ```
//!
//! Every account row is followed by its transaction rows in history order.

use crate::types::{Account, AccountNumber, LedgerError, Transaction, TransactionKind};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::str::FromStr;

/// Discriminates the two row shapes stored in one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Account,
    Transaction,
}

/// One line of the snapshot table
///
/// Profile fields are plain `String`s so an empty profile value survives the
/// round trip instead of collapsing to a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub record: RowType,
    pub account: AccountNumber,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub balance: Option<String>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<String>,
}

impl SnapshotRow {
    fn for_account(account: &Account) -> Self {
        SnapshotRow {
            record: RowType::Account,
            account: account.number(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            phone: account.phone().to_string(),
            password: account.password().to_string(),
            balance: Some(account.balance().to_string()),
            kind: None,
            amount: None,
        }
    }

    fn for_transaction(owner: AccountNumber, tx: &Transaction) -> Self {
        SnapshotRow {
            record: RowType::Transaction,
            account: owner,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            balance: None,
            kind: Some(tx.kind()),
            amount: Some(tx.amount().to_string()),
        }
    }
}

/// Write a full snapshot of `accounts`
///
/// Accounts are written in the order given; the ledger passes them sorted by
/// account number.
pub fn write_snapshot(accounts: &[&Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().from_writer(output);

    for account in accounts {
        writer.serialize(SnapshotRow::for_account(account))?;
        for tx in account.transactions() {
            writer.serialize(SnapshotRow::for_transaction(account.number(), tx))?;
        }
    }

    writer.flush()?;

    Ok(())
}

/// Read a full snapshot
///
/// Returns the accounts sorted by account number. Any row that cannot be
/// parsed or that would break a ledger invariant fails the whole read; a
/// partially restored ledger is never returned.
pub fn read_snapshot(input: &mut dyn Read) -> Result<Vec<Account>, LedgerError> {
    let mut reader = ReaderBuilder::new().from_reader(input);
    let headers = reader.headers()?.clone();

    let mut accounts: BTreeMap<AccountNumber, Account> = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line());

        let row: SnapshotRow = record
            .deserialize(Some(&headers))
            .map_err(|e| LedgerError::parse_error(line, e.to_string()))?;

        apply_row(&mut accounts, row).map_err(|e| with_line(e, line))?;
    }

    Ok(accounts.into_values().collect())
}

fn apply_row(
    accounts: &mut BTreeMap<AccountNumber, Account>,
    row: SnapshotRow,
) -> Result<(), LedgerError> {
    match row.record {
        RowType::Account => {
            if accounts.contains_key(&row.account) {
                return Err(LedgerError::corrupt_snapshot(
                    None,
                    format!("duplicate account {}", row.account),
                ));
            }

            let balance = parse_decimal(row.balance.as_deref(), "balance", row.account)?;
            let account = Account::restore(
                row.account,
                row.name,
                row.email,
                row.phone,
                row.password,
                balance,
            )?;
            accounts.insert(row.account, account);
        }
        RowType::Transaction => {
            let owner = accounts.get_mut(&row.account).ok_or_else(|| {
                LedgerError::corrupt_snapshot(
                    None,
                    format!("transaction for unknown account {}", row.account),
                )
            })?;

            let kind = row.kind.ok_or_else(|| {
                LedgerError::corrupt_snapshot(
                    None,
                    format!("transaction for account {} has no kind", row.account),
                )
            })?;
            let amount = parse_decimal(row.amount.as_deref(), "amount", row.account)?;

            owner.restore_transaction(Transaction::new(kind, amount))?;
        }
    }

    Ok(())
}

fn parse_decimal(
    value: Option<&str>,
    column: &str,
    account: AccountNumber,
) -> Result<Decimal, LedgerError> {
    let raw = value.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        LedgerError::corrupt_snapshot(
            None,
            format!("missing {} for account {}", column, account),
        )
    })?;

    Decimal::from_str(raw).map_err(|_| {
        LedgerError::parse_error(
            None,
            format!("invalid {} '{}' for account {}", column, raw, account),
        )
    })
}

fn with_line(error: LedgerError, line: Option<u64>) -> LedgerError {
    match error {
        LedgerError::CorruptSnapshot {
            line: None,
            message,
        } => LedgerError::CorruptSnapshot { line, message },
        LedgerError::ParseError {
            line: None,
            message,
        } => LedgerError::ParseError { line, message },
        other => other,
    }
}
