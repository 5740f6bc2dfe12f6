//! Account number extraction
//!
//! Turns a raw request path into the 8-digit account number it carries and
//! derives the cache key for it.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// == Key Constants ==
/// Namespace prefixed to every balance cache key.
pub const CACHE_NAMESPACE: &str = "tuc";

/// Length of an account number in digits.
pub const ACCOUNT_NUMBER_LEN: usize = 8;

// ASCII only: `\d` would also match non-Latin digits
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]+").expect("Invalid digit run pattern"));

// == Account Number ==
/// An 8-digit account number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Finds the first run of exactly eight digits in `path`.
    ///
    /// Runs are maximal: `"123456789"` is a nine-digit run and does not
    /// contain an account number. Returns `None` when no run qualifies.
    pub fn extract(path: &str) -> Option<Self> {
        DIGIT_RUN
            .find_iter(path)
            .find(|m| m.as_str().len() == ACCOUNT_NUMBER_LEN)
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache key for this account, `tuc:<number>`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", CACHE_NAMESPACE, self.0)
    }
}

// == Display ==
impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
