//! In-memory [`ChainRpc`] stub shared by unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::RpcError;
use crate::traits::ChainRpc;
use crate::types::{Address, Bytes, B256};

/// Number of adapter operations a stub has served, for asserting that
/// cache hits skip the chain entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallCounts {
    pub code_at: usize,
    pub storage_at: usize,
    pub calls: usize,
}

/// Scripted chain state: unset storage reads as zero, unmapped calls
/// revert, unknown addresses have no code. `network_down()` turns every
/// operation into a transport failure.
#[derive(Default)]
pub struct StubRpc {
    code: HashMap<Address, Bytes>,
    storage: HashMap<(Address, B256), B256>,
    calls: HashMap<(Address, Bytes), Bytes>,
    network_down: bool,
    counts: Mutex<CallCounts>,
}

impl StubRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, address: Address, code: &[u8]) -> Self {
        self.code.insert(address, Bytes::copy_from_slice(code));
        self
    }

    pub fn with_storage(mut self, address: Address, slot: B256, word: B256) -> Self {
        self.storage.insert((address, slot), word);
        self
    }

    /// Script an `eth_call` answer for the padded-selector calldata the
    /// probes send.
    pub fn with_call(mut self, to: Address, selector: B256, ret: &[u8]) -> Self {
        self.calls.insert(
            (to, Bytes::copy_from_slice(selector.as_slice())),
            Bytes::copy_from_slice(ret),
        );
        self
    }

    pub fn network_down(mut self) -> Self {
        self.network_down = true;
        self
    }

    pub fn counts(&self) -> CallCounts {
        *self.counts.lock().expect("counts lock poisoned")
    }

    fn check_up(&self) -> Result<(), RpcError> {
        if self.network_down {
            Err(RpcError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainRpc for StubRpc {
    async fn code_at(
        &self,
        address: Address,
        cancel: &CancellationToken,
    ) -> Result<Bytes, RpcError> {
        self.counts.lock().expect("counts lock poisoned").code_at += 1;
        self.check_up()?;
        if cancel.is_cancelled() {
            return Err(RpcError::Cancelled);
        }
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
        cancel: &CancellationToken,
    ) -> Result<B256, RpcError> {
        self.counts.lock().expect("counts lock poisoned").storage_at += 1;
        self.check_up()?;
        if cancel.is_cancelled() {
            return Err(RpcError::Cancelled);
        }
        Ok(self
            .storage
            .get(&(address, slot))
            .copied()
            .unwrap_or(B256::ZERO))
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        cancel: &CancellationToken,
    ) -> Result<Bytes, RpcError> {
        self.counts.lock().expect("counts lock poisoned").calls += 1;
        self.check_up()?;
        if cancel.is_cancelled() {
            return Err(RpcError::Cancelled);
        }
        self.calls
            .get(&(to, data))
            .cloned()
            .ok_or_else(|| RpcError::Execution("execution reverted".to_string()))
    }
}
