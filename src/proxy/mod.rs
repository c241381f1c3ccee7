//! Proxy-target detection engine
//!
//! Classifies an opaque on-chain contract against the known proxy
//! standards by probing it through the read-only [`ChainRpc`] surface:
//!
//! - EIP-1167 minimal proxy (bytecode template match)
//! - EIP-1967 logic slot and beacon slot
//! - OpenZeppelin legacy implementation slot
//! - EIP-1822 (UUPS) logic slot
//! - `implementation()` / `masterCopy()` / `comptrollerImplementation()`
//!   view-call interfaces (EIP-897, Gnosis Safe, Compound)
//!
//! All eight probes run concurrently and the first positive
//! classification wins; the rest are cancelled. A probe's own failure
//! mode (zero slot, reverted call, short return) dismisses that probe
//! silently. There is no priority order between probes: competing
//! classifications on a pathological contract resolve to whichever
//! probe answers first.

pub mod bytecode;
pub mod slots;

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::errors::{DetectError, RpcError};
use crate::traits::ChainRpc;
use crate::types::{Address, Bytes, ProxyInfo, ProxyKind, B256};

/// Decode the right-aligned address from a 32-byte return or storage
/// word. The zero address means "absent", never a legitimate target.
fn word_to_address(word: &[u8]) -> Option<Address> {
    if word.len() < 32 {
        return None;
    }
    let address = Address::from_slice(&word[12..32]);
    (!address.is_zero()).then_some(address)
}

/// Classify `address` against the known proxy patterns.
///
/// Returns `Ok(Some(_))` on the first positive classification,
/// `Ok(None)` when every probe finished without one, and an error only
/// for engine-level cancellation or an all-probes transport failure.
pub async fn detect_proxy_target(
    rpc: Arc<dyn ChainRpc>,
    address: Address,
    cancel: &CancellationToken,
) -> Result<Option<ProxyInfo>, DetectError> {
    let probe_cancel = cancel.child_token();
    let mut probes: JoinSet<Result<Option<ProxyInfo>, RpcError>> = JoinSet::new();

    probes.spawn(probe_bytecode(rpc.clone(), address, probe_cancel.clone()));
    probes.spawn(probe_slot(
        rpc.clone(),
        address,
        slots::EIP_1967_LOGIC_SLOT,
        ProxyKind::Eip1967Direct,
        probe_cancel.clone(),
    ));
    probes.spawn(probe_beacon(rpc.clone(), address, probe_cancel.clone()));
    probes.spawn(probe_slot(
        rpc.clone(),
        address,
        slots::OZ_IMPLEMENTATION_SLOT,
        ProxyKind::OpenZeppelin,
        probe_cancel.clone(),
    ));
    probes.spawn(probe_slot(
        rpc.clone(),
        address,
        slots::EIP_1822_LOGIC_SLOT,
        ProxyKind::Eip1822,
        probe_cancel.clone(),
    ));
    probes.spawn(probe_interface(
        rpc.clone(),
        address,
        slots::IMPLEMENTATION_CALL,
        probe_cancel.clone(),
    ));
    probes.spawn(probe_interface(
        rpc.clone(),
        address,
        slots::MASTER_COPY_CALL,
        probe_cancel.clone(),
    ));
    probes.spawn(probe_interface(
        rpc,
        address,
        slots::COMPTROLLER_IMPLEMENTATION_CALL,
        probe_cancel.clone(),
    ));

    // First transport-level failure, reported only if nothing succeeds
    let mut network_failure: Option<RpcError> = None;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                probe_cancel.cancel();
                return Err(DetectError::Cancelled);
            }
            joined = probes.join_next() => match joined {
                None => break,
                Some(Ok(Ok(Some(info)))) => {
                    probe_cancel.cancel();
                    return Ok(Some(info));
                }
                Some(Ok(Ok(None))) => {}
                Some(Ok(Err(err))) => {
                    if err.is_network() && network_failure.is_none() {
                        network_failure = Some(err);
                    }
                }
                Some(Err(join_err)) => {
                    tracing::debug!(error = %join_err, "proxy probe task died");
                }
            }
        }
    }

    match network_failure {
        Some(err) => Err(DetectError::Rpc(err)),
        None => Ok(None),
    }
}

/// EIP-1167: the target is hard-coded in the runtime bytecode.
async fn probe_bytecode(
    rpc: Arc<dyn ChainRpc>,
    address: Address,
    cancel: CancellationToken,
) -> Result<Option<ProxyInfo>, RpcError> {
    let code = rpc.code_at(address, &cancel).await?;
    Ok(bytecode::parse_minimal_proxy(&code).map(|target| ProxyInfo {
        target,
        kind: ProxyKind::Eip1167,
        immutable: true,
    }))
}

/// Read one well-known storage slot and classify on a non-zero address.
async fn probe_slot(
    rpc: Arc<dyn ChainRpc>,
    address: Address,
    slot: B256,
    kind: ProxyKind,
    cancel: CancellationToken,
) -> Result<Option<ProxyInfo>, RpcError> {
    let word = rpc.storage_at(address, slot, &cancel).await?;
    Ok(word_to_address(word.as_slice()).map(|target| ProxyInfo {
        target,
        kind,
        immutable: false,
    }))
}

/// EIP-1967 beacon: resolve the beacon address from storage, then ask
/// the beacon itself for the implementation, falling back from
/// `implementation()` to `childImplementation()`.
async fn probe_beacon(
    rpc: Arc<dyn ChainRpc>,
    address: Address,
    cancel: CancellationToken,
) -> Result<Option<ProxyInfo>, RpcError> {
    let word = rpc
        .storage_at(address, slots::EIP_1967_BEACON_SLOT, &cancel)
        .await?;
    let Some(beacon) = word_to_address(word.as_slice()) else {
        return Ok(None);
    };

    for method in slots::BEACON_METHODS {
        let data = Bytes::copy_from_slice(method.as_slice());
        match rpc.call(beacon, data, &cancel).await {
            Ok(ret) => {
                if let Some(target) = word_to_address(&ret) {
                    return Ok(Some(ProxyInfo {
                        target,
                        kind: ProxyKind::Eip1967Beacon,
                        immutable: false,
                    }));
                }
            }
            // A dead beacon method is no different from a revert here
            Err(_) => {}
        }
    }
    Ok(None)
}

/// Call an `implementation()`-style view function on the contract
/// itself and classify on a well-formed non-zero answer.
async fn probe_interface(
    rpc: Arc<dyn ChainRpc>,
    address: Address,
    selector: B256,
    cancel: CancellationToken,
) -> Result<Option<ProxyInfo>, RpcError> {
    let data = Bytes::copy_from_slice(selector.as_slice());
    match rpc.call(address, data, &cancel).await {
        Ok(ret) => Ok(word_to_address(&ret).map(|target| ProxyInfo {
            target,
            kind: ProxyKind::InterfaceCall,
            immutable: false,
        })),
        Err(err) if err.is_network() => Err(err),
        Err(_) => Ok(None),
    }
}
