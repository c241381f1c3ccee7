//! # Multi-chain contract-ABI resolution service
//!
//! Given a chain id, a contract address, and an RPC endpoint, resolves
//! the contract's ABI together with proxy metadata: whether the address
//! is a proxy, the implementation it points at, and whether the ABI had
//! to be recovered by decompilation.
//!
//! ## How a request flows
//!
//! - **Validate**: chain id, address, and RPC URL are checked up front.
//! - **Cache**: resolved records are kept in memory for the process
//!   lifetime, keyed by `"{chainId}-{address}"`.
//! - **Proxy detection**: eight concurrent probes classify the contract
//!   against the known proxy standards (EIP-1167, EIP-1967 direct and
//!   beacon, EIP-1822, OpenZeppelin legacy, and the
//!   `implementation()`-style call interfaces); the first positive
//!   answer wins and the rest are cancelled.
//! - **ABI lookup**: verified ABI from the chain's block explorer when
//!   one is registered, with fallback to the Heimdall decompiler.
//!
//! ## Module Structure
//!
//! - `rpc`: chain access over JSON-RPC (bytecode, storage, `eth_call`)
//! - `proxy`: the proxy-target detection engine
//! - `explorer`: Etherscan-family verified-ABI lookup
//! - `decompiler`: Heimdall decompilation client
//! - `cache`: process-lifetime ABI cache
//! - `resolver`: the resolution pipeline tying the above together
//! - `server`: axum HTTP edge
//! - `config`: chain registry and service configuration
//! - `errors`: error taxonomy
//! - `types`: core data structures

pub mod cache;
pub mod config;
pub mod decompiler;
pub mod errors;
pub mod explorer;
pub mod proxy;
pub mod resolver;
pub mod rpc;
pub mod server;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the core surface for easier access
pub use cache::AbiCache;
pub use config::{default_explorer_registry, ExplorerRegistry, ServiceConfig};
pub use decompiler::HeimdallClient;
pub use errors::{
    DecompilerError, DetectError, ExplorerError, ResolveError, RpcError,
};
pub use explorer::EtherscanApi;
pub use proxy::detect_proxy_target;
pub use resolver::AbiResolver;
pub use rpc::HttpChainRpc;
pub use traits::{ChainRpc, ExplorerApi};
pub use types::{AbiResponse, CacheRecord, ProxyInfo, ProxyKind};

// Re-export the primitives stack for convenience
pub use alloy;
