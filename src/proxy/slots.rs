//! Storage-slot and method-selector literals for proxy probing

use alloy::primitives::b256;

use crate::types::B256;

/// Slot for the EIP-1967 implementation address
///
/// Calculated as: keccak256("eip1967.proxy.implementation") - 1
pub const EIP_1967_LOGIC_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// Slot for the EIP-1967 beacon address
///
/// Calculated as: keccak256("eip1967.proxy.beacon") - 1
pub const EIP_1967_BEACON_SLOT: B256 =
    b256!("a3f0ad74e5423aebfd80d3ef4346578335a9a72aeaee59ff6cb3582b35133d50");

/// Slot for the EIP-1822 (UUPS) implementation address
///
/// Calculated as: keccak256("PROXIABLE")
pub const EIP_1822_LOGIC_SLOT: B256 =
    b256!("c5f16f0fcc639fa48a6947836d9850f504798523bf8c9a3a87d5876cf622bcf7");

/// Slot for the OpenZeppelin legacy implementation address
///
/// Calculated as: keccak256("org.zeppelinos.proxy.implementation")
pub const OZ_IMPLEMENTATION_SLOT: B256 =
    b256!("7050c9e0f4ca769c69bd3a8ef740bc37934f8e2c036e5a723fd8ee048ed3f8c3");

// Method selectors, right-padded to the 32-byte calldata words the
// probes send verbatim.

/// `implementation()`, for EIP-897 and beacon variant A
pub const IMPLEMENTATION_CALL: B256 =
    b256!("5c60da1b00000000000000000000000000000000000000000000000000000000");

/// `childImplementation()`, beacon variant B
pub const CHILD_IMPLEMENTATION_CALL: B256 =
    b256!("da52571600000000000000000000000000000000000000000000000000000000");

/// `masterCopy()`, Gnosis Safe
pub const MASTER_COPY_CALL: B256 =
    b256!("a619486e00000000000000000000000000000000000000000000000000000000");

/// `comptrollerImplementation()`, Compound
pub const COMPTROLLER_IMPLEMENTATION_CALL: B256 =
    b256!("bb82aa5e00000000000000000000000000000000000000000000000000000000");

/// Beacon resolution methods, tried in order against the beacon contract
pub const BEACON_METHODS: [B256; 2] = [IMPLEMENTATION_CALL, CHILD_IMPLEMENTATION_CALL];
