//! Service configuration and the per-chain explorer registry

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::explorer::EtherscanApi;
use crate::traits::ExplorerApi;

/// Mapping from chain id to the explorer that can serve it
pub type ExplorerRegistry = HashMap<u64, Arc<dyn ExplorerApi>>;

/// Supported chains: (chain id, explorer base URL, API-key env var)
static SUPPORTED_CHAINS: Lazy<Vec<(u64, &'static str, &'static str)>> = Lazy::new(|| {
    vec![
        (1, "https://api.etherscan.io/api", "ETHEREUM_API_KEY"),
        (
            11155111,
            "https://api-sepolia.etherscan.io/api",
            "SEPOLIA_API_KEY",
        ),
        (
            10,
            "https://api-optimistic.etherscan.io/api",
            "OPTIMISM_API_KEY",
        ),
        (56, "https://api.bscscan.com/api", "BSC_API_KEY"),
        (8453, "https://api.basescan.org/api", "BASE_API_KEY"),
        (137, "https://api.polygonscan.com/api", "POLYGON_API_KEY"),
    ]
});

/// Build the registry of every supported chain.
///
/// API keys are not checked here; a missing key surfaces per request so
/// that partially-configured deployments still serve the chains they
/// have keys for.
pub fn default_explorer_registry() -> ExplorerRegistry {
    SUPPORTED_CHAINS
        .iter()
        .map(|(chain_id, base_url, env_key)| {
            (
                *chain_id,
                Arc::new(EtherscanApi::new(*base_url, *env_key)) as Arc<dyn ExplorerApi>,
            )
        })
        .collect()
}

/// Listener configuration for the HTTP edge.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
}

impl ServiceConfig {
    /// Read `HOST` / `PORT` from the environment, defaulting to
    /// `0.0.0.0:8080`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);
        Self { host, port }
    }
}
