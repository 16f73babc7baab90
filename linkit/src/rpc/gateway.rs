//! RPC gateway
//!
//! The single network boundary of the client. One attempt per call, no
//! retry, no timeout. The gateway never fails outward: transport errors,
//! unexpected statuses, and malformed bodies all fold into the error
//! branch of the outcome.

use super::RpcEnvelope;
use crate::error::{AppError, Result};
use serde_json::Value;

/// Normalized result of a procedure call.
#[derive(Debug)]
pub struct RpcOutcome {
    pub data: Option<Value>,
    pub error: Option<AppError>,
}

impl RpcOutcome {
    fn failure(error: AppError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Collapse into a `Result` for the service layer.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

/// Client for the backend's stored procedures.
#[derive(Clone)]
pub struct RpcGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RpcGateway {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Invoke a named procedure with a JSON parameter object.
    pub async fn call(&self, procedure: &str, params: Value) -> RpcOutcome {
        let url = format!(
            "{}/rpc/{}",
            self.base_url.trim_end_matches('/'),
            procedure
        );

        let mut request = self.client.post(&url).json(&params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("RPC {} transport failure: {}", procedure, e);
                return RpcOutcome::failure(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Auth rejections and routing errors still answer with the
            // envelope; surface its message when present.
            let message = match response.json::<RpcEnvelope>().await {
                Ok(envelope) => envelope
                    .error
                    .unwrap_or_else(|| format!("status {}", status)),
                Err(_) => format!("status {}", status),
            };
            tracing::error!("RPC {} rejected: {}", procedure, message);
            return RpcOutcome::failure(AppError::Backend(message));
        }

        let envelope: RpcEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!("RPC {} returned a malformed body: {}", procedure, e);
                return RpcOutcome::failure(e.into());
            }
        };

        match envelope.error {
            Some(message) => {
                tracing::error!("RPC {} failed: {}", procedure, message);
                RpcOutcome::failure(AppError::Backend(message))
            }
            None => RpcOutcome {
                data: envelope.data,
                error: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_transport_failure_becomes_error_outcome() {
        // Port 9 (discard) refuses connections immediately.
        let gateway = RpcGateway::new("http://127.0.0.1:9", None);

        let outcome = gateway.call("get_user_products", json!({})).await;

        assert!(outcome.data.is_none());
        assert!(outcome.error.is_some());
        assert!(outcome.into_result().is_err());
    }
}
