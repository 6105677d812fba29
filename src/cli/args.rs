use crate::config::{LedgerConfig, DEFAULT_DATA_FILE, DEFAULT_FIRST_ACCOUNT_NUMBER};
use crate::types::AccountNumber;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Interactive personal banking ledger
#[derive(Parser, Debug)]
#[command(name = "personal-ledger")]
#[command(about = "Interactive personal banking ledger with durable storage", long_about = None)]
pub struct CliArgs {
    /// Snapshot file holding every account and its history
    #[arg(
        long = "data-file",
        value_name = "PATH",
        env = "LEDGER_DATA_FILE",
        default_value = DEFAULT_DATA_FILE,
        help = "Path to the ledger snapshot file"
    )]
    pub data_file: PathBuf,

    /// Account number given to the first account of an empty ledger
    #[arg(
        long = "first-account",
        value_name = "NUMBER",
        default_value_t = DEFAULT_FIRST_ACCOUNT_NUMBER,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "First account number for an empty ledger (default: 1001)"
    )]
    pub first_account_number: AccountNumber,

    /// Log verbosity (overridden by RUST_LOG)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level written to stderr: error, warn, info, debug or trace"
    )]
    pub log_level: LogLevel,
}

/// Log levels accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.data_file.clone(), self.first_account_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::explicit(&["program", "--data-file", "/tmp/bank.csv"], "/tmp/bank.csv")]
    #[case::relative(&["program", "--data-file", "data/ledger.csv"], "data/ledger.csv")]
    fn test_data_file_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.data_file, PathBuf::from(expected));
    }

    #[rstest]
    #[case::default(&["program"], 1001)]
    #[case::custom(&["program", "--first-account", "5000"], 5000)]
    #[case::one(&["program", "--first-account", "1"], 1)]
    fn test_first_account_parsing(#[case] args: &[&str], #[case] expected: AccountNumber) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.first_account_number, expected);
        assert_eq!(parsed.to_ledger_config().first_account_number, expected);
    }

    #[rstest]
    #[case::default(&["program"], LogLevel::Warn)]
    #[case::debug(&["program", "--log-level", "debug"], LogLevel::Debug)]
    #[case::error(&["program", "--log-level", "error"], LogLevel::Error)]
    fn test_log_level_parsing(#[case] args: &[&str], #[case] expected: LogLevel) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level, expected);
    }

    #[test]
    fn test_ledger_config_conversion() {
        let parsed =
            CliArgs::try_parse_from(["program", "--data-file", "x.csv", "--first-account", "7"])
                .unwrap();
        let config = parsed.to_ledger_config();

        assert_eq!(config, LedgerConfig::new("x.csv", 7));
    }

    // Error handling tests
    #[rstest]
    #[case::zero_first_account(&["program", "--first-account", "0"])]
    #[case::negative_first_account(&["program", "--first-account", "-4"])]
    #[case::invalid_log_level(&["program", "--log-level", "loud"])]
    #[case::unexpected_positional(&["program", "extra"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
