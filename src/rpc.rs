//! Chain RPC adapter backed by an alloy HTTP provider
//!
//! Wraps the three node operations the service needs (`eth_getCode`,
//! `eth_getStorageAt`, `eth_call`) behind the [`ChainRpc`] trait, with
//! cancellation support on every call. The provider is opened per
//! request and dropped with it; no pooling across requests.

use alloy::{
    network::TransactionBuilder,
    providers::{Provider, RootProvider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::RpcError;
use crate::traits::ChainRpc;
use crate::types::{Address, Bytes, B256, U256};

/// [`ChainRpc`] implementation over a single HTTP JSON-RPC endpoint.
#[derive(Debug)]
pub struct HttpChainRpc {
    provider: RootProvider,
}

impl HttpChainRpc {
    /// Connect to `rpc_url` (a full URL including the scheme).
    ///
    /// Only URL parsing happens here; the first network round-trip is
    /// deferred to the first operation.
    pub fn connect(rpc_url: &str) -> Result<Self, RpcError> {
        let url = rpc_url
            .parse()
            .map_err(|_| RpcError::InvalidUrl(rpc_url.to_string()))?;
        Ok(Self {
            provider: RootProvider::new_http(url),
        })
    }
}

#[async_trait]
impl ChainRpc for HttpChainRpc {
    async fn code_at(
        &self,
        address: Address,
        cancel: &CancellationToken,
    ) -> Result<Bytes, RpcError> {
        let request = async { self.provider.get_code_at(address).await };
        tokio::select! {
            _ = cancel.cancelled() => Err(RpcError::Cancelled),
            code = request => code.map_err(RpcError::from),
        }
    }

    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
        cancel: &CancellationToken,
    ) -> Result<B256, RpcError> {
        let request = async {
            self.provider
                .get_storage_at(address, U256::from_be_bytes(slot.0))
                .await
        };
        tokio::select! {
            _ = cancel.cancelled() => Err(RpcError::Cancelled),
            word = request => word.map(B256::from).map_err(RpcError::from),
        }
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        cancel: &CancellationToken,
    ) -> Result<Bytes, RpcError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        let request = async { self.provider.call(tx).await };
        tokio::select! {
            _ = cancel.cancelled() => Err(RpcError::Cancelled),
            output = request => output.map_err(RpcError::from),
        }
    }
}
