//! Session types

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Allowed account names
static ACCOUNT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{1,32}$").unwrap());

/// Validated account name, the key of the account store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Validate and wrap an account name
    pub fn parse(name: &str) -> Result<Self, AccountError> {
        let name = name.trim();
        if !ACCOUNT_NAME_PATTERN.is_match(name) {
            return Err(AccountError::InvalidName {
                name: name.to_string(),
                reason: "use 1-32 letters, digits, '.', '_' or '-'".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Borrow the raw name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountName {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
