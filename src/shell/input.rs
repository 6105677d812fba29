//! Parsing of typed user input
//!
//! All functions are pure so the shell's validation rules can be tested
//! without driving a whole session.

use crate::types::AccountNumber;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a money amount, accepting only values greater than zero
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

/// Parse an account number
pub fn parse_account_number(raw: &str) -> Option<AccountNumber> {
    raw.trim().parse().ok()
}

/// Strip the line terminator read from the terminal, keeping other whitespace
pub fn strip_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::integer("500", Some(Decimal::new(500, 0)))]
    #[case::fraction("12.75", Some(Decimal::new(1275, 2)))]
    #[case::padded("  3.5 \n", Some(Decimal::new(35, 1)))]
    #[case::zero("0", None)]
    #[case::negative("-20", None)]
    #[case::text("ten", None)]
    #[case::empty("", None)]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_amount(raw), expected);
    }

    #[rstest]
    #[case::plain("1001", Some(1001))]
    #[case::padded(" 1002\n", Some(1002))]
    #[case::negative("-1", None)]
    #[case::text("abc", None)]
    #[case::too_large("99999999999", None)]
    fn test_parse_account_number(#[case] raw: &str, #[case] expected: Option<AccountNumber>) {
        assert_eq!(parse_account_number(raw), expected);
    }

    #[rstest]
    #[case::unix("secret\n", "secret")]
    #[case::windows("secret\r\n", "secret")]
    #[case::keeps_spaces("  pass word  \n", "  pass word  ")]
    #[case::no_terminator("last", "last")]
    fn test_strip_line_ending(#[case] raw: &str, #[case] expected: &str) {
        let mut line = raw.to_string();
        strip_line_ending(&mut line);
        assert_eq!(line, expected);
    }
}
