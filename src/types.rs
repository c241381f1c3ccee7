//! Core types for ABI resolution and proxy classification

pub use alloy::primitives::{Address, Bytes, B256, U256};
use serde::Serialize;

/// Proxy standard a contract was classified against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProxyKind {
    /// EIP-1167 minimal proxy; target hard-coded in bytecode
    Eip1167,
    /// EIP-1967 logic slot
    Eip1967Direct,
    /// EIP-1967 beacon slot, resolved through the beacon contract
    Eip1967Beacon,
    /// EIP-1822 (UUPS) logic slot
    Eip1822,
    /// OpenZeppelin legacy unstructured-storage slot
    OpenZeppelin,
    /// Answered an `implementation()`-style view call
    /// (EIP-897, Gnosis Safe, Compound comptroller)
    InterfaceCall,
}

/// Result of a positive proxy classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyInfo {
    /// Resolved implementation address; never the zero address
    pub target: Address,
    /// Which pattern matched
    pub kind: ProxyKind,
    /// True only for EIP-1167: the target cannot change
    pub immutable: bool,
}

/// One resolved ABI, as stored in the cache and returned to callers
///
/// Invariant: `is_proxy` holds exactly when `implementation` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// ABI JSON, byte-identical to what the upstream source provided
    pub abi: String,
    /// Implementation address when the contract is a proxy
    pub implementation: Option<Address>,
    /// Whether proxy detection classified the contract
    pub is_proxy: bool,
    /// Whether the ABI came from the decompiler rather than an explorer
    pub is_decompiled: bool,
}

/// Wire shape of a successful `/abi` response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiResponse {
    pub abi: String,
    /// Checksummed implementation address, or null for non-proxies
    pub implementation: Option<String>,
    pub is_proxy: bool,
    pub is_decompiled: bool,
}

impl From<CacheRecord> for AbiResponse {
    fn from(record: CacheRecord) -> Self {
        Self {
            abi: record.abi,
            implementation: record.implementation.map(|addr| addr.to_string()),
            is_proxy: record.is_proxy,
            is_decompiled: record.is_decompiled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn response_renders_checksummed_implementation() {
        let record = CacheRecord {
            abi: "[]".to_string(),
            implementation: Some(address!("43506849d7c04f9138d1a2050bbf3a0c054402dd")),
            is_proxy: true,
            is_decompiled: false,
        };
        let response = AbiResponse::from(record);
        assert_eq!(
            response.implementation.as_deref(),
            Some("0x43506849D7C04F9138D1A2050bbF3A0c054402dd")
        );
    }

    #[test]
    fn response_serializes_camel_case_fields() {
        let record = CacheRecord {
            abi: "[]".to_string(),
            implementation: None,
            is_proxy: false,
            is_decompiled: true,
        };
        let json = serde_json::to_value(AbiResponse::from(record)).unwrap();
        assert_eq!(json["abi"], "[]");
        assert_eq!(json["implementation"], serde_json::Value::Null);
        assert_eq!(json["isProxy"], false);
        assert_eq!(json["isDecompiled"], true);
    }
}
