use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::MatchingEngineArguments;
use matching_engine::RunLoop;
use prometheus::Registry;

struct Liveness;

impl observe::metrics::LivenessChecking for Liveness {
    fn is_alive(&self) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = MatchingEngineArguments::parse();
    observe::init_tracing(&args.common.log_filter);
    tracing::info!(?args, "starting matching-engine");

    let cache = cache::OrderBookCache::connect(
        &args.common.redis_addr,
        args.common.redis_password.as_deref(),
    )
    .await
    .context("connecting to redis")?;

    observe::metrics::serve_metrics(
        Registry::new(),
        Arc::new(Liveness),
        ([0, 0, 0, 0], args.matching_service_port).into(),
    );

    let run_loop = RunLoop {
        cache,
        http: reqwest::Client::new(),
        execution_service_url: args.execution_service_url,
        tick_interval: args.tick_interval,
    };
    run_loop.run_forever().await
}
