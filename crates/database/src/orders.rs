use chrono::{DateTime, Utc};
use model::{Order, OrderStatus, Side};
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::{
    byte_array::{address_from_bytes, address_to_bytes, hash_from_bytes, hash_to_bytes, ByteArray},
    error::{is_unique_violation, Error},
    numeric::{bigdecimal_to_u256, u256_to_bigdecimal},
};

fn side_str(side: Side) -> &'static str {
    match side {
        Side::Ask => "ask",
        Side::Bid => "bid",
    }
}

fn parse_side(s: &str) -> Side {
    match s {
        "ask" => Side::Ask,
        "bid" => Side::Bid,
        other => unreachable!("unknown side column value {other}"),
    }
}

fn row_to_order(row: &sqlx::postgres::PgRow) -> Order {
    let maker: ByteArray<20> = row.get("maker");
    let nft_address: ByteArray<20> = row.get("nft_address");
    let payment_token: ByteArray<20> = row.get("payment_token");
    let hash: ByteArray<32> = row.get("hash");
    let signature: Vec<u8> = row.get("signature");
    let status: String = row.get("status");
    let side: String = row.get("side");

    Order {
        id: row.get("id"),
        maker: address_from_bytes(maker),
        nft_address: address_from_bytes(nft_address),
        token_id: bigdecimal_to_u256(row.get("token_id")).expect("stored token_id always fits"),
        payment_token: address_from_bytes(payment_token),
        price: bigdecimal_to_u256(row.get("price")).expect("stored price always fits"),
        expiry: row.get("expiry"),
        nonce: bigdecimal_to_u256(row.get("nonce")).expect("stored nonce always fits"),
        side: parse_side(&side),
        status: OrderStatus::from_str(&status).expect("stored status is always valid"),
        signature: model::Signature(signature.try_into().expect("signature column is 65 bytes")),
        hash: hash_from_bytes(hash),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// §4.1 `Create(Order)`. Fails with `Error::Conflict` on a `(maker, nonce)`
/// collision, enforced by a DB-level unique constraint (not an application
/// check — see §4.1's atomicity requirement).
pub async fn create(pool: &PgPool, order: &Order) -> Result<Order, Error> {
    const QUERY: &str = r#"
INSERT INTO orders (
    maker, nft_address, token_id, payment_token, price, expiry, nonce,
    side, status, signature, hash, created_at, updated_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now(), now())
RETURNING *
"#;
    let result = sqlx::query(QUERY)
        .bind(address_to_bytes(order.maker))
        .bind(address_to_bytes(order.nft_address))
        .bind(u256_to_bigdecimal(order.token_id))
        .bind(address_to_bytes(order.payment_token))
        .bind(u256_to_bigdecimal(order.price))
        .bind(order.expiry)
        .bind(u256_to_bigdecimal(order.nonce))
        .bind(side_str(order.side))
        .bind(order.status.to_string())
        .bind(order.signature.0.to_vec())
        .bind(hash_to_bytes(order.hash))
        .fetch_one(pool)
        .await;

    match result {
        Ok(row) => Ok(row_to_order(&row)),
        Err(err) if is_unique_violation(&err) => Err(Error::Conflict(format!(
            "order for maker {} nonce {} already exists",
            order.maker, order.nonce
        ))),
        Err(err) => Err(Error::Sqlx(err)),
    }
}

/// §4.1 `UpdateStatus`. Idempotent (no-op if already in `new_status`);
/// refuses backward transitions per §3's monotonic-progression invariant.
/// The `WHERE` clause only allows the transitions `ACTIVE -> new_status`;
/// the idempotent case is handled before issuing the query.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    new_status: OrderStatus,
) -> Result<Order, Error> {
    let current = find_by_id(pool, id).await?;
    if current.status == new_status {
        return Ok(current);
    }
    if !current.status.can_transition_to(new_status) {
        return Err(Error::IllegalTransition {
            from: current.status.to_string(),
            to: new_status.to_string(),
        });
    }

    const QUERY: &str = r#"
UPDATE orders SET status = $1, updated_at = now()
WHERE id = $2 AND status = $3
RETURNING *
"#;
    let row = sqlx::query(QUERY)
        .bind(new_status.to_string())
        .bind(id)
        .bind(current.status.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(row_to_order(&row)),
        // Another writer raced us to the same transition; re-read and treat
        // as the idempotent case rather than erroring.
        None => find_by_id(pool, id).await,
    }
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Order, Error> {
    const QUERY: &str = "SELECT * FROM orders WHERE id = $1";
    let row = sqlx::query(QUERY)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(row_to_order(&row))
}

/// §4.1 `ListActive`, ordered by descending `created_at`.
pub async fn list_active(
    pool: &PgPool,
    side: Option<Side>,
    collection: Option<model::Address>,
) -> Result<Vec<Order>, Error> {
    list_by_status_inner(pool, OrderStatus::Active, side, collection, "created_at").await
}

/// §4.1 `ListByStatus`, ordered by descending `updated_at`.
pub async fn list_by_status(
    pool: &PgPool,
    status: OrderStatus,
    side: Option<Side>,
    collection: Option<model::Address>,
) -> Result<Vec<Order>, Error> {
    list_by_status_inner(pool, status, side, collection, "updated_at").await
}

async fn list_by_status_inner(
    pool: &PgPool,
    status: OrderStatus,
    side: Option<Side>,
    collection: Option<model::Address>,
    order_by: &str,
) -> Result<Vec<Order>, Error> {
    let query = format!(
        "SELECT * FROM orders WHERE status = $1 \
         AND ($2::text IS NULL OR side = $2) \
         AND ($3::bytea IS NULL OR nft_address = $3) \
         ORDER BY {order_by} DESC"
    );
    let rows = sqlx::query(&query)
        .bind(status.to_string())
        .bind(side.map(side_str))
        .bind(collection.map(address_to_bytes))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_order).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_round_trips() {
        assert_eq!(parse_side(side_str(Side::Ask)), Side::Ask);
        assert_eq!(parse_side(side_str(Side::Bid)), Side::Bid);
    }
}
