//! Error types for ABI resolution
//!
//! This module defines the error handling system that covers:
//! - Chain RPC transport and execution errors
//! - Explorer and decompiler lookup errors
//! - Proxy detection errors
//! - Error conversion and propagation up to the HTTP edge

use thiserror::Error;

/// Top-level error type for the ABI resolution pipeline
///
/// Encompasses every failure a single resolution request can end in.
/// The HTTP edge performs exhaustive case analysis on this type to pick
/// a status code.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Malformed chainId, address, or rpcURL
    #[error("{0}")]
    InvalidInput(String),

    /// The address holds no bytecode on-chain
    #[error("Contract not found at address: {0}")]
    ContractNotFound(String),

    /// Chain RPC failure outside of proxy detection
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Explorer lookup failed and was the terminal failure
    #[error("Explorer error: {0}")]
    Explorer(#[from] ExplorerError),

    /// Decompiler lookup failed and was the terminal failure
    #[error("Decompiler error: {0}")]
    Decompiler(#[from] DecompilerError),

    /// Both ABI sources failed for the same request
    #[error("Failed to fetch ABI from both Etherscan and Heimdall")]
    SourcesExhausted {
        explorer: ExplorerError,
        decompiler: DecompilerError,
    },

    /// The request context ended before the resolution completed
    #[error("Request cancelled")]
    Cancelled,
}

/// Chain RPC adapter errors
///
/// Transport-level failures are kept distinct from successful-but-empty
/// results (empty bytecode, zero storage) and from execution-level
/// responses such as reverts, which the detection engine treats as
/// expected probe dismissals.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Invalid or malformed RPC URL
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout, or HTTP-level failure
    #[error("RPC transport failure: {0}")]
    Transport(String),

    /// Response was not valid JSON-RPC
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    /// The node answered with a JSON-RPC error (revert, unknown method)
    #[error("RPC call failed: {0}")]
    Execution(String),

    /// The cancellation token fired mid-request
    #[error("RPC call cancelled")]
    Cancelled,
}

impl RpcError {
    /// Whether this is a network-class failure (as opposed to an
    /// execution-level response or a cancellation).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            RpcError::InvalidUrl(_) | RpcError::Transport(_) | RpcError::InvalidResponse(_)
        )
    }
}

impl From<alloy::transports::TransportError> for RpcError {
    fn from(err: alloy::transports::TransportError) -> Self {
        use alloy::transports::RpcError as AlloyError;
        match err {
            AlloyError::ErrorResp(payload) => RpcError::Execution(payload.to_string()),
            AlloyError::DeserError { err, .. } => RpcError::InvalidResponse(err.to_string()),
            AlloyError::NullResp => RpcError::InvalidResponse("null response".to_string()),
            other => RpcError::Transport(other.to_string()),
        }
    }
}

/// Proxy detection engine errors
///
/// Individual probe failures never surface here; the engine swallows
/// them. Only engine-level cancellation and all-probes-dead transport
/// failures escape.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The request context was cancelled before any probe succeeded
    #[error("Proxy detection cancelled")]
    Cancelled,

    /// No probe succeeded and at least one failed at the transport level
    #[error("Proxy detection failed: {0}")]
    Rpc(#[from] RpcError),
}

/// Explorer adapter errors
///
/// The upstream API reports "contract not verified" and operational
/// failures the same way; callers treat every variant as "try the
/// fallback source".
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// No explorer registered for the chain
    #[error("No explorer registered for chain {0}")]
    UnsupportedChain(u64),

    /// The API-key environment variable is unset
    #[error("API key {0} is not set")]
    MissingApiKey(String),

    /// HTTP request failed or returned a non-200 status
    #[error("Explorer request failed: {0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("Unreadable explorer response: {0}")]
    Decode(String),

    /// The API answered with a non-success status field
    #[error("Explorer API error: {0}")]
    Api(String),
}

/// Decompiler adapter errors
#[derive(Debug, Error)]
pub enum DecompilerError {
    /// HTTP request failed before a status was received
    #[error("Decompiler request failed: {0}")]
    Http(String),

    /// The service answered with a non-200 status
    #[error("Decompiler API error ({status}): {body}")]
    Status { status: u16, body: String },
}
