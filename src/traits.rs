//! Capability traits at the service's seams
//!
//! # Key Traits
//! - [`ChainRpc`]: read-only access to on-chain state, the only surface
//!   the proxy detection engine probes through
//! - [`ExplorerApi`]: per-chain verified-ABI lookup

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::{ExplorerError, RpcError};
use crate::types::{Address, Bytes, B256};

/// Read-only JSON-RPC operations against a single node
///
/// Every operation accepts a cancellation token; an implementation must
/// abort promptly and return [`RpcError::Cancelled`] once it fires.
/// Empty bytecode, zero storage words, and reverted calls are successful
/// results at this layer, not errors.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Deployed runtime bytecode at `address`; empty for EOAs and
    /// self-destructed contracts.
    async fn code_at(&self, address: Address, cancel: &CancellationToken)
        -> Result<Bytes, RpcError>;

    /// Raw 32-byte storage word at `slot`; all zeros when never written.
    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
        cancel: &CancellationToken,
    ) -> Result<B256, RpcError>;

    /// Read-only `eth_call` against `to` at the latest block.
    async fn call(
        &self,
        to: Address,
        data: Bytes,
        cancel: &CancellationToken,
    ) -> Result<Bytes, RpcError>;
}

/// Verified-ABI lookup against a block explorer
///
/// One instance per chain; implementations are interchangeable behind
/// this trait and carry their own base URL and API-key configuration.
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Fetch the verified ABI JSON for `address`, verbatim.
    async fn get_abi(&self, address: Address) -> Result<String, ExplorerError>;
}
