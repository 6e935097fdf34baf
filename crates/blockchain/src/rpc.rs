use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Failure modes of a single JSON-RPC round trip.
#[derive(Error, Debug)]
pub enum RpcFailure {
    /// The request never produced a parseable JSON body (connection refused,
    /// timeout, non-JSON response).
    #[error("{0}")]
    Transport(String),

    /// The node answered with a JSON-RPC `error` object; carries the remote
    /// message verbatim.
    #[error("{0}")]
    Remote(String),

    /// The body parsed but matched neither `{result}` nor `{error}`.
    #[error("{0}")]
    Shape(String),
}

/// Minimal JSON-RPC 2.0 client over HTTP. One best-effort round trip per
/// call: no retries, no caching, no rate limiting.
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    auth: Option<(String, String)>,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            auth: None,
        }
    }

    pub fn with_basic_auth(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            auth: Some((username.into(), password.into())),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue `method` with `params` and unwrap the response envelope.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        debug!("JSON-RPC call: {} -> {}", method, self.url);

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let mut builder = self.http.post(&self.url).json(&request);
        if let Some((username, password)) = &self.auth {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;

        // Nodes report JSON-RPC errors on non-2xx statuses too; the body is
        // authoritative when it parses.
        let body: Value = response
            .json()
            .await
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;

        unwrap_envelope(body)
    }
}

/// Unwrap `{result}` or surface `{error}` with the remote message verbatim.
fn unwrap_envelope(body: Value) -> Result<Value, RpcFailure> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(RpcFailure::Remote(message));
    }

    match body.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(RpcFailure::Shape(
            "response contained neither result nor error".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_result() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": {"value": 42}});
        let result = unwrap_envelope(body).unwrap();
        assert_eq!(result["value"], 42);
    }

    #[test]
    fn test_unwrap_null_result_is_ok() {
        // getTransaction returns result: null for unknown signatures.
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": null});
        assert!(unwrap_envelope(body).unwrap().is_null());
    }

    #[test]
    fn test_unwrap_error_carries_remote_message() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32602, "message": "Invalid param: WrongSize"}
        });
        match unwrap_envelope(body) {
            Err(RpcFailure::Remote(msg)) => assert_eq!(msg, "Invalid param: WrongSize"),
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_error_without_message_field() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "error": "boom"});
        match unwrap_envelope(body) {
            Err(RpcFailure::Remote(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_malformed_envelope() {
        let body = json!({"jsonrpc": "2.0", "id": 1});
        assert!(matches!(unwrap_envelope(body), Err(RpcFailure::Shape(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_rpc_failure() {
        // Nothing listens on this port.
        let client = JsonRpcClient::new("http://127.0.0.1:1/");
        let result = client.call("getHealth", json!([])).await;
        assert!(matches!(result, Err(RpcFailure::Transport(_))));
    }
}
