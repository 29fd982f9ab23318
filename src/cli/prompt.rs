//! Interactive password prompt.

use console::Term;

use crate::error::{Error, Result};

/// Ask for the account password on the terminal without echoing it.
pub fn prompt_password(account: &str) -> Result<String> {
    let term = Term::stderr();
    term.write_str(&format!("{}'s password: ", account))?;
    let password = term.read_secure_line()?;

    if password.is_empty() {
        return Err(Error::Login("password cannot be empty".to_string()));
    }

    Ok(password)
}
