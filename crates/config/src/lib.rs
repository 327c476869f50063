//! Configuration shared by all four binaries (§6 "Configuration (environment
//! variables)"). The original groups everything into one process-wide
//! struct; here each binary parses only the arguments it actually reads,
//! flattening in the fields every binary needs ([`CommonArguments`]). See
//! `DESIGN.md` for the rationale.

use std::time::Duration;

use model::Address;
use url::Url;

/// Fields every binary needs: the store, the cache, and the chain.
///
/// `Debug` is hand-implemented to redact `redis_password` and any
/// credentials embedded in `postgres_dsn` — every binary logs `?args` (or
/// a `CommonArguments`-flattening wrapper) at startup, and a DSN's userinfo
/// is exactly the kind of secret that must never reach the logs.
#[derive(clap::Parser)]
pub struct CommonArguments {
    /// `POSTGRES_DSN`. Required; no default, unlike the teacher's
    /// `postgresql://` fallback — an empty DSN silently pointing at a local
    /// superuser-trust instance is the wrong default for this system.
    #[clap(long, env)]
    pub postgres_dsn: Url,

    /// `REDIS_ADDR`.
    #[clap(long, env, default_value = "127.0.0.1:6379")]
    pub redis_addr: String,

    /// `REDIS_PASSWORD`.
    #[clap(long, env)]
    pub redis_password: Option<String>,

    /// `MARKETPLACE_ADDRESS`.
    #[clap(long, env)]
    pub marketplace_address: Address,

    /// `RPC_URL`.
    #[clap(long, env)]
    pub rpc_url: Url,

    /// `CHAIN_ID`.
    #[clap(long, env)]
    pub chain_id: u64,

    #[clap(long, env, default_value = "info")]
    pub log_filter: String,
}

fn duration_from_seconds(s: &str) -> Result<Duration, std::num::ParseIntError> {
    Ok(Duration::from_secs(s.parse()?))
}

fn redacted_dsn(url: &Url) -> String {
    let mut redacted = url.clone();
    let _ = redacted.set_password(None);
    let _ = redacted.set_username("");
    redacted.to_string()
}

impl std::fmt::Debug for CommonArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonArguments")
            .field("postgres_dsn", &redacted_dsn(&self.postgres_dsn))
            .field("redis_addr", &self.redis_addr)
            .field(
                "redis_password",
                &self.redis_password.as_ref().map(|_| "<redacted>"),
            )
            .field("marketplace_address", &self.marketplace_address)
            .field("rpc_url", &self.rpc_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

/// `crates/order-service` (C3).
#[derive(clap::Parser, Debug)]
pub struct OrderServiceArguments {
    #[clap(flatten)]
    pub common: CommonArguments,

    /// `ORDER_SERVICE_PORT`.
    #[clap(long, env, default_value = "8081")]
    pub order_service_port: u16,
}

/// `crates/matching-engine` (C4).
#[derive(clap::Parser, Debug)]
pub struct MatchingEngineArguments {
    #[clap(flatten)]
    pub common: CommonArguments,

    /// `MATCHING_SERVICE_PORT`. Bound only for a liveness probe; C4 has no
    /// public API (§4.4 dispatches outbound to C5, nothing inbound).
    #[clap(long, env, default_value = "8082")]
    pub matching_service_port: u16,

    /// Tick period T (§4.4, default 5s).
    #[clap(long, env, default_value = "5", value_parser = duration_from_seconds)]
    pub tick_interval: Duration,

    /// Base URL of the execution service's `/internal/execute` endpoint.
    #[clap(long, env, default_value = "http://127.0.0.1:8083")]
    pub execution_service_url: Url,
}

/// `crates/execution-service` (C5).
#[derive(clap::Parser)]
pub struct ExecutionServiceArguments {
    #[clap(flatten)]
    pub common: CommonArguments,

    /// `EXECUTION_SERVICE_PORT`.
    #[clap(long, env, default_value = "8083")]
    pub execution_service_port: u16,

    /// `EXECUTOR_PRIVATE_KEY`. Absence puts C5 in read-only mode (§4.5).
    #[clap(long, env)]
    pub executor_private_key: Option<String>,
}

impl std::fmt::Debug for ExecutionServiceArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionServiceArguments")
            .field("common", &self.common)
            .field("execution_service_port", &self.execution_service_port)
            .field(
                "executor_private_key",
                &self.executor_private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// `crates/indexer` (C6).
#[derive(clap::Parser, Debug)]
pub struct IndexerArguments {
    #[clap(flatten)]
    pub common: CommonArguments,

    /// `INDEXER_SERVICE_PORT`, bound only for a liveness probe.
    #[clap(long, env, default_value = "8084")]
    pub indexer_service_port: u16,

    /// Reconciliation period T_r (§4.6, default 10s in dev / 5min in prod —
    /// left to the deployer to override; the flag default matches dev).
    #[clap(long, env, default_value = "10", value_parser = duration_from_seconds)]
    pub reconciliation_interval: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_required_fields_from_args() {
        let args = OrderServiceArguments::parse_from([
            "order-service",
            "--postgres-dsn",
            "postgresql://localhost/oeasy",
            "--marketplace-address",
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "--rpc-url",
            "https://rpc.example",
            "--chain-id",
            "1",
        ]);
        assert_eq!(args.order_service_port, 8081);
        assert_eq!(args.common.redis_addr, "127.0.0.1:6379");
        assert_eq!(args.common.chain_id, 1);
    }
}
