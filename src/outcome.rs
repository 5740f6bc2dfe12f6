//! Outcome classification
//!
//! Folds a read-through result into one of the three answers a client can
//! see, and renders that answer as an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::FetchError;
use crate::models::BalanceRecord;
use crate::upstream::UpstreamError;

// == Outcome ==
/// The only thing a client ever learns about a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Balance found (200 with body)
    Success(BalanceRecord),
    /// Account number unknown upstream or not present in the path (404)
    NotFound,
    /// Anything else went wrong (503)
    Unavailable,
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Success(_) => StatusCode::OK,
            Outcome::NotFound => StatusCode::NOT_FOUND,
            Outcome::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// == Classifier ==
/// Maps a read-through result onto an [`Outcome`].
///
/// Only upstream codes 100 and 104 mean not-found; every other failure,
/// including store failures and code-less transport errors, is unavailable.
pub fn classify(result: Result<BalanceRecord, FetchError<UpstreamError>>) -> Outcome {
    match result {
        Ok(record) => Outcome::Success(record),
        Err(FetchError::Producer(e)) if e.is_not_found() => Outcome::NotFound,
        Err(FetchError::Producer(_)) | Err(FetchError::Store(_)) => Outcome::Unavailable,
    }
}

// == Responder ==
impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Success(record) => (StatusCode::OK, Json(record)).into_response(),
            other => other.status().into_response(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use proptest::prelude::*;

    fn rejected(code: i64) -> Result<BalanceRecord, FetchError<UpstreamError>> {
        Err(FetchError::Producer(UpstreamError::Rejected {
            code,
            message: "upstream said no".to_string(),
        }))
    }

    #[test]
    fn test_success() {
        let record = BalanceRecord::new("87654321", 42.5);
        assert_eq!(classify(Ok(record.clone())), Outcome::Success(record));
    }

    #[test]
    fn test_not_found_codes() {
        assert_eq!(classify(rejected(100)), Outcome::NotFound);
        assert_eq!(classify(rejected(104)), Outcome::NotFound);
    }

    #[test]
    fn test_codeless_failures_are_unavailable() {
        let transport = Err(FetchError::Producer(UpstreamError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(classify(transport), Outcome::Unavailable);

        let invalid = Err(FetchError::Producer(UpstreamError::InvalidBalance(
            "abc".to_string(),
        )));
        assert_eq!(classify(invalid), Outcome::Unavailable);

        let store = Err(FetchError::Store(CacheError::Redis("down".to_string())));
        assert_eq!(classify(store), Outcome::Unavailable);
    }

    #[tokio::test]
    async fn test_error_responses_have_empty_bodies() {
        for (outcome, status) in [
            (Outcome::NotFound, StatusCode::NOT_FOUND),
            (Outcome::Unavailable, StatusCode::SERVICE_UNAVAILABLE),
        ] {
            let response = outcome.into_response();
            assert_eq!(response.status(), status);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_success_response_body() {
        let response = Outcome::Success(BalanceRecord::new("87654321", 42.5)).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"number": "87654321", "balance": 42.5}));
    }

    // == Property Tests ==
    proptest! {
        // Every coded rejection lands on exactly one of the two failure outcomes.
        #[test]
        fn prop_coded_rejections_are_total(code in any::<i64>()) {
            let expected = if code == 100 || code == 104 {
                Outcome::NotFound
            } else {
                Outcome::Unavailable
            };
            prop_assert_eq!(classify(rejected(code)), expected);
        }

        #[test]
        fn prop_any_balance_is_success(balance in any::<f64>().prop_filter("finite", |b| b.is_finite())) {
            let outcome = classify(Ok(BalanceRecord::new("12345678", balance)));
            prop_assert_eq!(outcome.status(), StatusCode::OK);
        }
    }
}
