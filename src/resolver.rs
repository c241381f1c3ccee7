//! ABI resolution pipeline
//!
//! Orchestrates one request end to end: validate input, consult the
//! cache, verify the address is a contract, run proxy detection, pick
//! the lookup target, fetch the ABI from the explorer with decompiler
//! fallback, store, return. Proxy-detection failure never fails the
//! request; the contract is treated as a non-proxy and resolution
//! proceeds against the original address.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cache::AbiCache;
use crate::config::ExplorerRegistry;
use crate::decompiler::HeimdallClient;
use crate::errors::{ExplorerError, ResolveError};
use crate::proxy::detect_proxy_target;
use crate::rpc::HttpChainRpc;
use crate::traits::ChainRpc;
use crate::types::{Address, CacheRecord};

/// A request that passed input validation.
struct ValidatedRequest {
    chain: u64,
    address: Address,
    rpc_url: String,
    /// Literal cache key, preserving the caller's address casing
    key: String,
}

impl ValidatedRequest {
    fn parse(chain_id: &str, address: &str, rpc_url: &str) -> Result<Self, ResolveError> {
        let chain = match chain_id.parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => {
                return Err(ResolveError::InvalidInput(
                    "Invalid chainId: must be a positive integer".to_string(),
                ))
            }
        };

        if address.len() != 42 || !address.starts_with("0x") {
            return Err(ResolveError::InvalidInput(
                "Invalid address: must be 42 characters long (including '0x' prefix)".to_string(),
            ));
        }
        let parsed: Address = address.parse().map_err(|_| {
            ResolveError::InvalidInput("Invalid address: not a hexadecimal address".to_string())
        })?;

        if rpc_url.is_empty() {
            return Err(ResolveError::InvalidInput(
                "Invalid rpcURL: cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            chain,
            address: parsed,
            rpc_url: rpc_url.to_string(),
            key: AbiCache::key(chain_id, address),
        })
    }

    fn dial_url(&self) -> String {
        format!("https://{}", self.rpc_url)
    }
}

/// The resolution pipeline with its collaborators.
pub struct AbiResolver {
    cache: AbiCache,
    explorers: ExplorerRegistry,
    decompiler: HeimdallClient,
}

impl AbiResolver {
    pub fn new(explorers: ExplorerRegistry, decompiler: HeimdallClient) -> Self {
        Self {
            cache: AbiCache::new(),
            explorers,
            decompiler,
        }
    }

    pub fn cache(&self) -> &AbiCache {
        &self.cache
    }

    /// Resolve one `(chainId, address, rpcURL)` request, dialing the
    /// node over HTTPS.
    pub async fn resolve(
        &self,
        chain_id: &str,
        address: &str,
        rpc_url: &str,
        cancel: &CancellationToken,
    ) -> Result<CacheRecord, ResolveError> {
        let request = ValidatedRequest::parse(chain_id, address, rpc_url)?;
        if let Some(record) = self.cache.get(&request.key) {
            tracing::debug!(key = %request.key, "cache hit");
            return Ok(record);
        }
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        let rpc: Arc<dyn ChainRpc> = Arc::new(HttpChainRpc::connect(&request.dial_url())?);
        self.resolve_on(&request, rpc, cancel).await
    }

    /// Same pipeline with a caller-supplied RPC adapter; used when
    /// embedding the resolver with a custom transport and by tests.
    pub async fn resolve_with_rpc(
        &self,
        chain_id: &str,
        address: &str,
        rpc_url: &str,
        rpc: Arc<dyn ChainRpc>,
        cancel: &CancellationToken,
    ) -> Result<CacheRecord, ResolveError> {
        let request = ValidatedRequest::parse(chain_id, address, rpc_url)?;
        if let Some(record) = self.cache.get(&request.key) {
            tracing::debug!(key = %request.key, "cache hit");
            return Ok(record);
        }
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        self.resolve_on(&request, rpc, cancel).await
    }

    async fn resolve_on(
        &self,
        request: &ValidatedRequest,
        rpc: Arc<dyn ChainRpc>,
        cancel: &CancellationToken,
    ) -> Result<CacheRecord, ResolveError> {
        let code = rpc.code_at(request.address, cancel).await?;
        if code.is_empty() {
            return Err(ResolveError::ContractNotFound(request.address.to_string()));
        }

        let proxy = match detect_proxy_target(rpc, request.address, cancel).await {
            Ok(classification) => classification,
            Err(err) => {
                tracing::warn!(
                    address = %request.address,
                    error = %err,
                    "proxy detection failed; continuing as non-proxy"
                );
                None
            }
        };
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let target = proxy.map(|info| info.target).unwrap_or(request.address);
        let (abi, is_decompiled) = self.fetch_abi(request.chain, target, &request.rpc_url).await?;

        let record = CacheRecord {
            abi,
            implementation: proxy.map(|info| info.target),
            is_proxy: proxy.is_some(),
            is_decompiled,
        };
        self.cache.insert(request.key.clone(), record.clone());
        Ok(record)
    }

    /// Explorer first for registered chains, decompiler on any failure.
    async fn fetch_abi(
        &self,
        chain: u64,
        target: Address,
        rpc_url: &str,
    ) -> Result<(String, bool), ResolveError> {
        let explorer_err = match self.explorers.get(&chain) {
            Some(api) => match api.get_abi(target).await {
                Ok(abi) => return Ok((abi, false)),
                Err(err) => {
                    tracing::warn!(chain, error = %err, "explorer lookup failed; trying decompiler");
                    err
                }
            },
            None => ExplorerError::UnsupportedChain(chain),
        };

        match self.decompiler.get_abi(target, rpc_url).await {
            Ok(abi) => Ok((abi, true)),
            Err(decompiler_err) => Err(ResolveError::SourcesExhausted {
                explorer: explorer_err,
                decompiler: decompiler_err,
            }),
        }
    }
}
