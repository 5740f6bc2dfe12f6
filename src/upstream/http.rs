//! HTTP upstream client
//!
//! Posts `{"card": "<number>"}` to the configured endpoint and decodes a reply
//! carrying either a balance or a coded error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BalanceLookup, UpstreamError};

// == Wire Types ==
#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    card: &'a str,
}

/// Coded error as sent by the upstream service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Raw upstream reply body.
///
/// The balance arrives either as a JSON number or as a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupReply {
    #[serde(default)]
    pub balance: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl LookupReply {
    /// Collapses the reply into a balance or an [`UpstreamError`].
    ///
    /// An `error` object wins over any balance sent alongside it.
    pub fn into_result(self) -> Result<f64, UpstreamError> {
        if let Some(error) = self.error {
            return Err(UpstreamError::Rejected {
                code: error.code,
                message: error.message,
            });
        }

        match self.balance {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| UpstreamError::InvalidBalance(n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|b| b.is_finite())
                .ok_or(UpstreamError::InvalidBalance(s)),
            Some(other) => Err(UpstreamError::InvalidBalance(other.to_string())),
            None => Err(UpstreamError::InvalidBalance("missing balance".to_string())),
        }
    }
}

// == HTTP Client ==
/// Balance lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpUpstream {
    /// Builds a client for `endpoint`; `timeout` bounds each whole request.
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

// == Balance Lookup ==
#[async_trait]
impl BalanceLookup for HttpUpstream {
    async fn lookup_balance(&self, number: &str) -> Result<f64, UpstreamError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&LookupRequest { card: number });

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let status = response.status();

        match response.json::<LookupReply>().await {
            Ok(reply) => reply.into_result(),
            Err(_) if !status.is_success() => Err(UpstreamError::Transport(format!(
                "upstream responded with {}",
                status
            ))),
            Err(e) => Err(UpstreamError::InvalidBalance(e.to_string())),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> LookupReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_string_balance() {
        assert_eq!(reply(r#"{"balance":"42.50"}"#).into_result(), Ok(42.5));
    }

    #[test]
    fn test_numeric_balance() {
        assert_eq!(reply(r#"{"balance":12}"#).into_result(), Ok(12.0));
    }

    #[test]
    fn test_coded_error() {
        let result = reply(r#"{"error":{"code":104,"message":"not provisioned"}}"#).into_result();
        assert_eq!(
            result,
            Err(UpstreamError::Rejected {
                code: 104,
                message: "not provisioned".to_string()
            })
        );
    }

    #[test]
    fn test_error_without_message() {
        let result = reply(r#"{"error":{"code":500}}"#).into_result();
        assert_eq!(result.unwrap_err().code(), Some(500));
    }

    #[test]
    fn test_invalid_balances() {
        for body in [
            r#"{"balance":"abc"}"#,
            r#"{"balance":"NaN"}"#,
            r#"{"balance":true}"#,
            r#"{}"#,
        ] {
            assert!(
                matches!(reply(body).into_result(), Err(UpstreamError::InvalidBalance(_))),
                "{} should be rejected",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a loopback port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let upstream = HttpUpstream::new(
            format!("http://{}/balance", addr),
            None,
            Duration::from_secs(2),
        )
        .unwrap();

        let result = upstream.lookup_balance("12345678").await;
        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }
}
