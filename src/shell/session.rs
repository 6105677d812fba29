//! Login state of the interactive shell

use crate::types::AccountNumber;

/// Who, if anyone, is currently using the shell
///
/// Only register, login and exit are offered while `LoggedOut`; every account
/// operation requires `LoggedIn` and acts on that account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(AccountNumber),
}

impl Session {
    pub fn account(&self) -> Option<AccountNumber> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(number) => Some(*number),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }
}
