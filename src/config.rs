//! Ledger configuration

use crate::types::AccountNumber;
use std::path::PathBuf;

/// Default snapshot location, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "accounts.csv";

/// Number handed to the first account of an empty ledger
pub const DEFAULT_FIRST_ACCOUNT_NUMBER: AccountNumber = 1001;

/// Settings needed to open a ledger
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Where the snapshot is loaded from and saved to
    pub data_file: PathBuf,
    /// Counter value used when no accounts exist yet
    pub first_account_number: AccountNumber,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            first_account_number: DEFAULT_FIRST_ACCOUNT_NUMBER,
        }
    }
}

impl LedgerConfig {
    /// Create a new LedgerConfig
    ///
    /// A first account number of zero is replaced by the default.
    pub fn new(data_file: impl Into<PathBuf>, first_account_number: AccountNumber) -> Self {
        Self {
            data_file: data_file.into(),
            first_account_number: positive_or_default(first_account_number),
        }
    }
}

/// Account numbers are always positive; zero falls back to the default
pub(crate) fn positive_or_default(first_account_number: AccountNumber) -> AccountNumber {
    if first_account_number == 0 {
        DEFAULT_FIRST_ACCOUNT_NUMBER
    } else {
        first_account_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.data_file, PathBuf::from("accounts.csv"));
        assert_eq!(config.first_account_number, 1001);
    }

    #[rstest]
    #[case::custom(5, 5)]
    #[case::zero_falls_back(0, 1001)]
    fn test_first_account_number(#[case] given: AccountNumber, #[case] expected: AccountNumber) {
        let config = LedgerConfig::new("x.csv", given);
        assert_eq!(config.first_account_number, expected);
    }
}
