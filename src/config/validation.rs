//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum account name length.
const MAX_ACCOUNT_NAME_LENGTH: usize = 30;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_account_name(&config.account_name)?;
    Ok(())
}

/// Validate the account name.
///
/// The name becomes part of the settings file name and the output tree, so it
/// is held to the platform's own username alphabet.
pub fn validate_account_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ConfigValidation {
            field: "account".to_string(),
            message: "Account name cannot be empty".to_string(),
        });
    }

    if name.len() > MAX_ACCOUNT_NAME_LENGTH {
        return Err(Error::ConfigValidation {
            field: "account".to_string(),
            message: format!(
                "Account name '{}' is too long (maximum {} characters)",
                name, MAX_ACCOUNT_NAME_LENGTH
            ),
        });
    }

    let pattern = Regex::new(r"^[A-Za-z0-9._]+$").unwrap();
    if !pattern.is_match(name) || name == "." || name == ".." {
        return Err(Error::ConfigValidation {
            field: "account".to_string(),
            message: format!(
                "Account name '{}' contains invalid characters. Only letters, digits, '.' and '_' allowed.",
                name
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_account_names() {
        assert!(validate_account_name("alice").is_ok());
        assert!(validate_account_name("alice.smith_99").is_ok());
        assert!(validate_account_name("a").is_ok());
    }

    #[test]
    fn test_invalid_account_names() {
        assert!(validate_account_name("").is_err());
        assert!(validate_account_name("..").is_err());
        assert!(validate_account_name("../etc").is_err());
        assert!(validate_account_name("has space").is_err());
        assert!(validate_account_name(&"x".repeat(31)).is_err());
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&Config::new("alice")).is_ok());
        assert!(validate_config(&Config::new("a/b")).is_err());
    }
}
