use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Utc;
use model::{Order, OrderStatus};

use crate::{
    dto::{
        CancelOrderRequest, CreateOrderRequest, ListOrdersQuery, ListOrdersResponse,
        OrderResponse, parse_status,
    },
    error::ApiError,
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(create_order).get(list_orders))
        .route("/api/orders/{id}/cancel", post(cancel_order))
        .with_state(Arc::new(state))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// §4.3 create-order operation, steps 1-8. Steps 1 (addresses), 2 (U256
/// parse), 4 (side) and 5 (signature decodes to 65 bytes) already happened
/// during JSON deserialization of `CreateOrderRequest` — a malformed payload
/// never reaches this function body.
async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderResponse>), ApiError> {
    if req.price.is_zero() {
        return Err(ApiError::InvalidPayload("price must be positive".into()));
    }
    let now = Utc::now();
    if req.expiry <= now.timestamp() {
        return Err(ApiError::InvalidPayload(
            "expiry must be in the future".into(),
        ));
    }
    let expiry = chrono::DateTime::<Utc>::from_timestamp(req.expiry, 0)
        .ok_or_else(|| ApiError::InvalidPayload("expiry out of range".into()))?;

    let expiry_u256 = alloy_primitives::U256::from(req.expiry as u64);
    let (digest, recovered) = chain::order_digest_and_recover(
        &state.domain,
        req.maker.to_alloy(),
        req.nft_address.to_alloy(),
        req.token_id,
        req.payment_token.to_alloy(),
        req.price,
        expiry_u256,
        req.nonce,
        req.side,
        &req.signature,
    )
    .map_err(|err| ApiError::InvalidPayload(err.to_string()))?;

    if model::Address::from_alloy(recovered) != req.maker {
        return Err(ApiError::SignatureMismatch);
    }

    let order = Order {
        id: 0,
        maker: req.maker,
        nft_address: req.nft_address,
        token_id: req.token_id,
        payment_token: req.payment_token,
        price: req.price,
        expiry,
        nonce: req.nonce,
        side: req.side,
        status: OrderStatus::Active,
        signature: req.signature,
        hash: digest,
        created_at: now,
        updated_at: now,
    };

    let created = database::orders::create(&state.db, &order).await?;

    if let Err(err) = state.cache.put(&created).await {
        tracing::warn!(?err, order_id = created.id, "failed to cache new order");
    }

    Ok((
        axum::http::StatusCode::CREATED,
        Json(OrderResponse::from(&created)),
    ))
}

/// §4.3 list-orders operation.
async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let status = query.status.as_deref().unwrap_or("active");
    let orders = if status == "active" {
        database::orders::list_active(&state.db, query.side, query.collection).await?
    } else {
        let parsed = parse_status(status).map_err(ApiError::InvalidPayload)?;
        database::orders::list_by_status(&state.db, parsed, query.side, query.collection).await?
    };
    Ok(Json(ListOrdersResponse {
        orders: orders.iter().map(OrderResponse::from).collect(),
    }))
}

/// §4.3 cancel-order operation, steps 1-6.
async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = database::orders::find_by_id(&state.db, id).await?;
    if order.status != OrderStatus::Active {
        return Err(ApiError::InvalidPayload(
            "order is not in ACTIVE status".into(),
        ));
    }
    if order.maker != req.maker {
        return Err(ApiError::SignatureMismatch);
    }

    // Step 3: a fresh `Cancel` typed-data value, distinct from `Order`'s
    // type, is constructed on every call — see `chain::domain`'s module doc.
    let (_, recovered) = chain::cancel_digest_and_recover(
        &state.domain,
        req.maker.to_alloy(),
        req.nonce,
        &req.signature,
    )
    .map_err(|err| ApiError::InvalidPayload(err.to_string()))?;

    if model::Address::from_alloy(recovered) != order.maker {
        return Err(ApiError::SignatureMismatch);
    }

    let cancelled = database::orders::update_status(&state.db, id, OrderStatus::Cancelled).await?;

    if let Err(err) = state.cache.delete(order.side, &order.hash_hex()).await {
        tracing::warn!(?err, order_id = id, "failed to evict cancelled order from cache");
    }

    let announcement = cache::record::CancellationAnnouncement {
        order_id: id,
        maker: order.maker,
        nonce: order.nonce,
        hash: order.hash_hex(),
        time: Utc::now(),
    };
    // Step 6: failure to publish is ignored (§4.3).
    if let Err(err) = state.cache.announce_cancellation(&announcement).await {
        tracing::warn!(?err, order_id = id, "failed to publish cancellation");
    }

    Ok(Json(OrderResponse::from(&cancelled)))
}
