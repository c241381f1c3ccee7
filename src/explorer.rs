//! Explorer adapter for Etherscan-family APIs
//!
//! One [`EtherscanApi`] per chain, all speaking the same
//! `module=contract&action=getabi` wire protocol with a per-chain base
//! URL and API-key environment variable. The key is read from the
//! environment at request time, matching the deployment model where
//! keys may be rotated without a restart.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::errors::ExplorerError;
use crate::traits::ExplorerApi;
use crate::types::Address;

/// Shared client across every explorer instance
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("failed to build reqwest client")
});

/// Envelope every Etherscan-family endpoint answers with;
/// `status == "1"` marks success and `result` carries the ABI JSON.
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    result: String,
}

/// Etherscan-compatible explorer for a single chain.
pub struct EtherscanApi {
    base_url: String,
    env_key: String,
}

impl EtherscanApi {
    pub fn new(base_url: impl Into<String>, env_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            env_key: env_key.into(),
        }
    }
}

#[async_trait]
impl ExplorerApi for EtherscanApi {
    async fn get_abi(&self, address: Address) -> Result<String, ExplorerError> {
        let api_key = std::env::var(&self.env_key)
            .map_err(|_| ExplorerError::MissingApiKey(self.env_key.clone()))?;

        let response = HTTP_CLIENT
            .get(&self.base_url)
            .query(&[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", &address.to_string()),
                ("apikey", &api_key),
            ])
            .send()
            .await
            .map_err(|e| ExplorerError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExplorerError::Http(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: EtherscanResponse = response
            .json()
            .await
            .map_err(|e| ExplorerError::Decode(e.to_string()))?;

        if body.status != "1" {
            return Err(ExplorerError::Api(body.message));
        }
        Ok(body.result)
    }
}
