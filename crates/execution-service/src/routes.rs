use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    dto::{ExecuteRequest, ExecuteResponse, OrderTupleDto},
    error::ExecutionError,
    state::AppState,
};

/// Read-only mode (§4.5: "If no executor key is configured ... it does not
/// register the execute endpoint") only mounts `/internal/health`.
pub fn router(state: Option<Arc<AppState>>) -> Router {
    match state {
        Some(state) => Router::new()
            .route("/internal/execute", post(execute))
            .route("/internal/health", get(health))
            .with_state(state)
            .layer(tower_http::trace::TraceLayer::new_for_http()),
        None => Router::new()
            .route("/internal/health", get(read_only_health))
            .layer(tower_http::trace::TraceLayer::new_for_http()),
    }
}

fn to_order_tuple(dto: &OrderTupleDto) -> chain::OrderTuple {
    chain::to_order_tuple(
        dto.maker.to_alloy(),
        dto.nft.to_alloy(),
        dto.token_id,
        dto.payment_token.to_alloy(),
        dto.price,
        dto.expiry,
        dto.nonce,
        dto.side,
    )
}

/// §4.5 algorithm, steps 1-6.
async fn execute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ExecutionError> {
    let maker_order = to_order_tuple(&req.maker_order);
    let taker_order = to_order_tuple(&req.taker_order);
    let signature = {
        let stripped = req.maker_signature.strip_prefix("0x").unwrap_or(&req.maker_signature);
        hex::decode(stripped)
            .map_err(|err| ExecutionError::InvalidPayload(format!("bad makerSignature: {err}")))?
    };

    let nonce = state
        .nonce
        .assign_nonce(&state.chain, state.executor_address())
        .await
        .map_err(|err| ExecutionError::SubmissionFailed(err.to_string()))?;
    let gas_price = state
        .chain
        .suggested_gas_price()
        .await
        .map_err(|err| ExecutionError::SubmissionFailed(err.to_string()))?;

    let tx_hash = state
        .chain
        .submit_execute_trade(maker_order, taker_order, signature, nonce, gas_price)
        .await
        .map_err(|err| ExecutionError::SubmissionFailed(err.to_string()))?;

    Ok(Json(ExecuteResponse {
        tx_hash: format!("{tx_hash:?}"),
        status: "submitted",
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "executor": state.executor_address().to_string() }))
}

async fn read_only_health() -> impl IntoResponse {
    Json(json!({ "executor": None::<String>, "mode": "read-only" }))
}
