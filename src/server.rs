//! HTTP edge
//!
//! Two routes: a liveness probe at `/` and the resolution endpoint at
//! `/abi/{chainId}/{address}/{*rpcUrl}`, where the wildcard carries the
//! node URL without its scheme (slashes and all). Errors from the
//! pipeline map exhaustively onto status codes here. CORS is permissive
//! on every route, a development default.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::{ResolveError, RpcError};
use crate::resolver::AbiResolver;
use crate::types::AbiResponse;

/// Shared state behind every handler.
pub struct AppState {
    pub resolver: AbiResolver,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/abi/{chain_id}/{address}/{*rpc_url}", get(get_abi))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "abi-resolver is up and running",
    }))
}

async fn get_abi(
    State(state): State<Arc<AppState>>,
    Path((chain_id, address, rpc_url)): Path<(String, String, String)>,
) -> Response {
    let cancel = CancellationToken::new();
    let rpc_url = rpc_url.trim_start_matches('/');

    match state
        .resolver
        .resolve(&chain_id, &address, rpc_url, &cancel)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(AbiResponse::from(record))).into_response(),
        Err(err) => {
            tracing::info!(%chain_id, %address, error = %err, "resolution failed");
            let status = status_for(&err);
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

/// Exhaustive error-to-status mapping.
fn status_for(err: &ResolveError) -> StatusCode {
    match err {
        ResolveError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ResolveError::Rpc(RpcError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
        ResolveError::ContractNotFound(_) => StatusCode::NOT_FOUND,
        ResolveError::Explorer(_) => StatusCode::SERVICE_UNAVAILABLE,
        ResolveError::Decompiler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ResolveError::SourcesExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ResolveError::Rpc(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ResolveError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
