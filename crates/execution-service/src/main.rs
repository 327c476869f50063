use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::ExecutionServiceArguments;
use execution_service::{AppState, router};
use execution_service::nonce::NonceManager;
use prometheus::Registry;

struct Liveness;

impl observe::metrics::LivenessChecking for Liveness {
    fn is_alive(&self) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ExecutionServiceArguments::parse();
    observe::init_tracing(&args.common.log_filter);
    tracing::info!(?args, "starting execution-service");

    let app = match &args.executor_private_key {
        Some(key) => {
            let executor = chain::ExecutorKey::from_hex(key).context("parsing executor key")?;
            tracing::info!(address = %executor.address(), "executor key configured");
            let provider =
                chain::http_provider(&args.common.rpc_url, executor.signer().clone());
            let chain_client =
                chain::ChainClient::new(provider, args.common.marketplace_address.to_alloy());
            let state = Arc::new(AppState {
                chain: chain_client,
                executor,
                nonce: NonceManager::new(),
            });
            router(Some(state))
        }
        None => {
            tracing::warn!("EXECUTOR_PRIVATE_KEY not set; starting in read-only mode");
            router(None)
        }
    };

    observe::metrics::serve_metrics(
        Registry::new(),
        Arc::new(Liveness),
        ([0, 0, 0, 0], args.execution_service_port + 1000).into(),
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.execution_service_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "serving execution-service");
    axum::serve(listener, app).await?;
    Ok(())
}
