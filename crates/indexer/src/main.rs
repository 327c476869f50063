use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::IndexerArguments;
use indexer::Reconciler;
use prometheus::Registry;

struct Liveness;

impl observe::metrics::LivenessChecking for Liveness {
    fn is_alive(&self) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = IndexerArguments::parse();
    observe::init_tracing(&args.common.log_filter);
    tracing::info!(?args, "starting indexer");

    let pool = database::connect(args.common.postgres_dsn.as_str(), 4)
        .await
        .context("connecting to postgres")?;

    let provider = chain::http_provider_readonly(&args.common.rpc_url);
    let chain_client =
        chain::ChainClient::new(provider, args.common.marketplace_address.to_alloy());

    // The live pub-sub loop (§4.6) is intentionally not run here: the spec
    // allows it to be entirely absent against chains without a pub-sub
    // transport, and reconciliation alone is sufficient for correctness.
    let reconciler = Reconciler::new(pool, chain_client, args.reconciliation_interval);

    observe::metrics::serve_metrics(
        Registry::new(),
        Arc::new(Liveness),
        ([0, 0, 0, 0], args.indexer_service_port).into(),
    );

    tracing::info!(
        interval_secs = args.reconciliation_interval.as_secs(),
        "reconciliation loop starting"
    );
    reconciler.run_forever().await;
}
