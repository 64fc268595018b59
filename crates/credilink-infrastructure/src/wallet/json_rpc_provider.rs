//! Wallet provider speaking EIP-1193 methods over JSON-RPC/HTTP.

use async_trait::async_trait;
use credilink_core::wallet::{ProviderError, WalletProvider};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC request structure
#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// JSON-RPC response structure
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure
#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Wallet provider reached through a JSON-RPC endpoint.
///
/// Sends `eth_requestAccounts`, `eth_chainId` and
/// `wallet_switchEthereumChain` to the configured URL, which is expected
/// to be a wallet or a node that exposes its accounts.
pub struct JsonRpcWalletProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcWalletProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a JSON-RPC request and wait for the result
    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::debug!("[JsonRpc] {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        // A parsable body takes precedence over the HTTP status.
        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Transport(format!("HTTP {}", status)));
            }
            Err(e) => return Err(ProviderError::InvalidResponse(e.to_string())),
        };

        into_result(body)
    }
}

/// Unwraps a JSON-RPC response body into its result.
fn into_result(body: Value) -> Result<Value, ProviderError> {
    let response: JsonRpcResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(ProviderError::from_rpc(error.code, error.message));
    }
    Ok(response.result.unwrap_or(Value::Null))
}

fn parse_accounts(result: Value) -> Result<Vec<String>, ProviderError> {
    serde_json::from_value(result)
        .map_err(|e| ProviderError::InvalidResponse(format!("accounts: {}", e)))
}

/// Parses a JSON-RPC quantity: a `0x`-prefixed hex string, or a plain number.
fn parse_quantity(value: &Value) -> Result<u64, ProviderError> {
    match value {
        Value::String(s) => {
            let digits = s
                .strip_prefix("0x")
                .or_else(|| s.strip_prefix("0X"))
                .ok_or_else(|| {
                    ProviderError::InvalidResponse(format!("not a hex quantity: {}", s))
                })?;
            u64::from_str_radix(digits, 16)
                .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", s, e)))
        }
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ProviderError::InvalidResponse(format!("not a quantity: {}", n))),
        other => Err(ProviderError::InvalidResponse(format!(
            "not a quantity: {}",
            other
        ))),
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let result = self.call("eth_requestAccounts", json!([])).await?;
        parse_accounts(result)
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let result = self.call("eth_chainId", json!([])).await?;
        parse_quantity(&result)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.call(
            "wallet_switchEthereumChain",
            json!([{ "chainId": format!("{:#x}", chain_id) }]),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn provider(url: impl Into<String>) -> JsonRpcWalletProvider {
        JsonRpcWalletProvider::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not an HTTP server.
        let provider =
            JsonRpcWalletProvider::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();

        let err = provider.request_accounts().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_accounts_over_http() {
        let url = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":["0xabc"]}"#).await;

        let accounts = provider(url).request_accounts().await.unwrap();
        assert_eq!(accounts, vec!["0xabc".to_string()]);
    }

    #[tokio::test]
    async fn test_rejection_over_http() {
        let url = serve_once(
            "200 OK",
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected"}}"#,
        )
        .await;

        let err = provider(url).switch_chain(137).await.unwrap_err();
        assert_eq!(err, ProviderError::UserRejected);
    }

    #[tokio::test]
    async fn test_http_error_without_json_body() {
        let url = serve_once("502 Bad Gateway", "upstream down").await;

        let err = provider(url).chain_id().await.unwrap_err();
        assert_eq!(err, ProviderError::Transport("HTTP 502 Bad Gateway".to_string()));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_invalid_response() {
        let url = serve_once("200 OK", "<html>not rpc</html>").await;

        let err = provider(url).chain_id().await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_request_shape() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "wallet_switchEthereumChain",
            params: json!([{ "chainId": format!("{:#x}", 137u64) }]),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["params"][0]["chainId"], "0x89");
    }

    #[test]
    fn test_result_and_error_bodies() {
        let ok = into_result(json!({"jsonrpc": "2.0", "id": 1, "result": ["0xabc"]})).unwrap();
        assert_eq!(parse_accounts(ok).unwrap(), vec!["0xabc".to_string()]);

        let rejected = into_result(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4001, "message": "User rejected the request."}
        }));
        assert_eq!(rejected.unwrap_err(), ProviderError::UserRejected);

        let other = into_result(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4902, "message": "Unrecognized chain ID"}
        }));
        assert!(matches!(other, Err(ProviderError::Rpc { code: 4902, .. })));
    }

    #[test]
    fn test_null_result_for_switch() {
        assert_eq!(
            into_result(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!("0x1")).unwrap(), 1);
        assert_eq!(parse_quantity(&json!("0x89")).unwrap(), 137);
        assert_eq!(parse_quantity(&json!(56)).unwrap(), 56);
        assert!(parse_quantity(&json!("137")).is_err());
        assert!(parse_quantity(&json!("0xzz")).is_err());
        assert!(parse_quantity(&json!(null)).is_err());
    }

    #[test]
    fn test_accounts_must_be_strings() {
        assert!(parse_accounts(json!([1, 2])).is_err());
        assert_eq!(parse_accounts(json!([])).unwrap(), Vec::<String>::new());
    }
}
