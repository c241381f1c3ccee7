//! Decompiler adapter for the Heimdall API
//!
//! Last-resort ABI source: the service decompiles the deployed bytecode
//! and answers with a function-signature-level ABI. Lossy, but good
//! enough when no verified source exists.

use std::time::Duration;

use crate::errors::DecompilerError;
use crate::types::Address;

const DEFAULT_BASE_URL: &str = "https://heimdall-api.fly.dev";

/// Client for the Heimdall decompilation service.
pub struct HeimdallClient {
    base_url: String,
    http: reqwest::Client,
}

impl HeimdallClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint; used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                // Decompilation is slow for large contracts
                .timeout(Duration::from_secs(120))
                .build()
                .expect("failed to build reqwest client"),
        }
    }

    /// Fetch a decompiled ABI for `address`.
    ///
    /// `rpc_url` is forwarded without its scheme; the service dials the
    /// node itself to pull the bytecode.
    pub async fn get_abi(
        &self,
        address: Address,
        rpc_url: &str,
    ) -> Result<String, DecompilerError> {
        let url = format!("{}/{}?rpc_url={}", self.base_url, address, rpc_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DecompilerError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DecompilerError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(DecompilerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

impl Default for HeimdallClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use mockito::Matcher;

    const CONTRACT: Address = address!("759c0e9d7858566df8ab751026bedce462ff42df");

    #[tokio::test]
    async fn returns_body_verbatim_on_success() {
        let mut server = mockito::Server::new_async().await;
        let abi = r#"[{"type":"function","name":"getOwner"}]"#;
        let mock = server
            .mock("GET", format!("/{CONTRACT}").as_str())
            .match_query(Matcher::UrlEncoded(
                "rpc_url".into(),
                "rpc.ankr.com/eth_sepolia".into(),
            ))
            .with_status(200)
            .with_body(abi)
            .create_async()
            .await;

        let client = HeimdallClient::with_base_url(server.url());
        let result = client
            .get_abi(CONTRACT, "rpc.ankr.com/eth_sepolia")
            .await
            .unwrap();

        assert_eq!(result, abi);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/{CONTRACT}").as_str())
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("decompilation failed")
            .create_async()
            .await;

        let client = HeimdallClient::with_base_url(server.url());
        let err = client
            .get_abi(CONTRACT, "rpc.ankr.com/eth")
            .await
            .unwrap_err();

        match err {
            DecompilerError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "decompilation failed");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
