use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::OrderServiceArguments;
use order_service::{AppState, router};
use prometheus::Registry;

struct Liveness;

impl observe::metrics::LivenessChecking for Liveness {
    fn is_alive(&self) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = OrderServiceArguments::parse();
    observe::init_tracing(&args.common.log_filter);
    tracing::info!(?args, "starting order-service");

    let db = database::connect(args.common.postgres_dsn.as_str(), 16)
        .await
        .context("connecting to postgres")?;
    let cache = cache::OrderBookCache::connect(
        &args.common.redis_addr,
        args.common.redis_password.as_deref(),
    )
    .await
    .context("connecting to redis")?;

    // §9 "Cache rebuild on restart": warm C2 from C1.ListActive.
    let active = database::orders::list_active(&db, None, None)
        .await
        .context("loading active orders for cache rebuild")?;
    cache
        .rebuild_from(&active)
        .await
        .context("rebuilding cache from active orders")?;
    tracing::info!(count = active.len(), "cache warmed from active orders");

    let domain = chain::domain(
        args.common.chain_id,
        args.common.marketplace_address.to_alloy(),
    );

    let state = AppState {
        db,
        cache,
        domain,
        marketplace: args.common.marketplace_address,
    };

    observe::metrics::serve_metrics(
        Registry::new(),
        Arc::new(Liveness),
        ([0, 0, 0, 0], args.order_service_port + 1000).into(),
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.order_service_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "serving order-service");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
