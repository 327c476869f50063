//! A minimal `/metrics` + `/health` axum router, served on each binary's own
//! port alongside its primary API (§6 ports). Grounded on the teacher's
//! `observe::metrics::serve_metrics` call sites (`crates/autopilot/src/run.rs`),
//! re-derived against the plain `prometheus` crate rather than
//! `prometheus-metric-storage`, since none of our metrics need that crate's
//! macro-generated struct registration.

use std::net::SocketAddr;

use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use prometheus::{Encoder, Registry, TextEncoder};

/// Implemented by each service's readiness state so `/health` can report
/// something more meaningful than "the process is alive".
pub trait LivenessChecking: Send + Sync + 'static {
    fn is_alive(&self) -> bool;
}

#[derive(Clone)]
struct AppState<L> {
    registry: Registry,
    liveness: std::sync::Arc<L>,
}

async fn metrics_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LivenessChecking,
{
    let encoder = TextEncoder::new();
    let families = state.registry.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&families, &mut buffer).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }
    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

async fn health_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LivenessChecking,
{
    if state.liveness.is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Spawns a background task serving `/metrics` and `/health` on `addr`.
/// Fire-and-forget: a bind failure is logged and the task simply exits,
/// matching the teacher's treatment of the metrics server as best-effort
/// observability, never load-bearing for correctness.
pub fn serve_metrics<L>(registry: Registry, liveness: std::sync::Arc<L>, addr: SocketAddr)
where
    L: LivenessChecking,
{
    let state = AppState { registry, liveness };
    let app = Router::new()
        .route("/metrics", get(metrics_handler::<L>))
        .route("/health", get(health_handler::<L>))
        .with_state(state);

    tokio::spawn(async move {
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                if let Err(err) = axum::serve(listener, app).await {
                    tracing::error!(?err, "metrics server exited");
                }
            }
            Err(err) => tracing::error!(?err, %addr, "failed to bind metrics server"),
        }
    });
}
