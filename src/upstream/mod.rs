//! Upstream Module
//!
//! The balance lookup service this proxy fronts. Every failure shape the
//! service can produce is normalized into [`UpstreamError`] here, so callers
//! match on one tagged type.

mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use self::http::{ErrorBody, HttpUpstream, LookupReply};

// == Upstream Codes ==
/// Upstream code for an account number it does not recognize.
pub const CODE_NOT_RECOGNIZED: i64 = 100;

/// Upstream code for an account number that exists but is not provisioned.
pub const CODE_NOT_PROVISIONED: i64 = 104;

// == Upstream Error ==
/// Failure of a balance lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// The service answered with a coded error
    #[error("upstream rejected lookup with code {code}: {message}")]
    Rejected { code: i64, message: String },

    /// The service could not be reached or did not answer intelligibly
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// The service answered without a usable balance
    #[error("upstream returned an invalid balance: {0}")]
    InvalidBalance(String),
}

impl UpstreamError {
    /// Returns the upstream code, if the service sent one.
    pub fn code(&self) -> Option<i64> {
        match self {
            UpstreamError::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True for codes meaning the account number does not exist upstream.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code(),
            Some(CODE_NOT_RECOGNIZED) | Some(CODE_NOT_PROVISIONED)
        )
    }
}

// == Balance Lookup Trait ==
/// A service that can look up the balance of an account number.
#[async_trait]
pub trait BalanceLookup: Send + Sync {
    async fn lookup_balance(&self, number: &str) -> Result<f64, UpstreamError>;
}
