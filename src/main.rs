use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use abi_resolver::{
    config::{default_explorer_registry, ServiceConfig},
    decompiler::HeimdallClient,
    resolver::AbiResolver,
    server::{router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env, loaded before the filter so RUST_LOG from it applies;
    // the process environment wins when both are present
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !dotenv_loaded {
        tracing::debug!("no .env file found, using process environment");
    }

    let config = ServiceConfig::from_env();
    let state = Arc::new(AppState {
        resolver: AbiResolver::new(default_explorer_registry(), HeimdallClient::new()),
    });

    let listener =
        tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "abi-resolver listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
