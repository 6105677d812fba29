//! Personal Ledger CLI
//!
//! Interactive terminal front end for the personal ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-file ~/ledger.csv
//! cargo run -- --first-account 5000 --log-level info
//! LEDGER_DATA_FILE=/tmp/ledger.csv cargo run
//! ```
//!
//! The program loads the snapshot (a missing or unreadable file means an empty
//! ledger), then shows the main menu on stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (terminal input or output failed)

use personal_ledger::{cli, logging, Ledger, Shell};
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    logging::init(args.log_level);

    let ledger = Ledger::open(&args.to_ledger_config());

    let stdin = std::io::stdin();
    let mut shell = Shell::new(ledger, stdin.lock(), std::io::stdout());
    if let Err(e) = shell.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
