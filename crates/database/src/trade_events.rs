use model::{Side, TradeEvent};
use sqlx::{PgPool, Row};

use crate::{
    byte_array::{address_from_bytes, address_to_bytes, hash_from_bytes, hash_to_bytes, ByteArray},
    error::{is_unique_violation, Error},
    numeric::{bigdecimal_to_u256, u256_to_bigdecimal},
};

fn row_to_event(row: &sqlx::postgres::PgRow) -> TradeEvent {
    let transaction_hash: ByteArray<32> = row.get("transaction_hash");
    let maker: ByteArray<20> = row.get("maker");
    let taker: ByteArray<20> = row.get("taker");
    let nft_address: ByteArray<20> = row.get("nft_address");
    let payment_token: ByteArray<20> = row.get("payment_token");
    let side: String = row.get("side");

    TradeEvent {
        transaction_hash: hash_from_bytes(transaction_hash),
        log_index: row.get("log_index"),
        block_number: row.get("block_number"),
        maker: address_from_bytes(maker),
        taker: address_from_bytes(taker),
        nft_address: address_from_bytes(nft_address),
        token_id: bigdecimal_to_u256(row.get("token_id")).expect("stored token_id always fits"),
        payment_token: address_from_bytes(payment_token),
        price: bigdecimal_to_u256(row.get("price")).expect("stored price always fits"),
        side: if side == "ask" { Side::Ask } else { Side::Bid },
        fee: bigdecimal_to_u256(row.get("fee")).expect("stored fee always fits"),
        inserted_at: row.get("inserted_at"),
    }
}

/// §4.1 `InsertTradeEventIfAbsent`. A duplicate `(transaction_hash,
/// log_index)` is a success-signal (`Ok(false)`), not an error — §4.6
/// `processLog` step 1 relies on this to know whether it already recorded
/// this log on a prior, partially-failed attempt.
///
/// Returns `Ok(true)` if a new row was inserted, `Ok(false)` if the row
/// already existed.
pub async fn insert_if_absent(pool: &PgPool, event: &TradeEvent) -> Result<bool, Error> {
    const QUERY: &str = r#"
INSERT INTO trade_events (
    transaction_hash, log_index, block_number, maker, taker, nft_address,
    token_id, payment_token, price, side, fee, inserted_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
"#;
    let result = sqlx::query(QUERY)
        .bind(hash_to_bytes(event.transaction_hash))
        .bind(event.log_index)
        .bind(event.block_number)
        .bind(address_to_bytes(event.maker))
        .bind(address_to_bytes(event.taker))
        .bind(address_to_bytes(event.nft_address))
        .bind(u256_to_bigdecimal(event.token_id))
        .bind(address_to_bytes(event.payment_token))
        .bind(u256_to_bigdecimal(event.price))
        .bind(if event.side == Side::Ask { "ask" } else { "bid" })
        .bind(u256_to_bigdecimal(event.fee))
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if is_unique_violation(&err) => Ok(false),
        Err(err) => Err(Error::Sqlx(err)),
    }
}

pub async fn find_by_tx_and_log_index(
    pool: &PgPool,
    transaction_hash: [u8; 32],
    log_index: i64,
) -> Result<Option<TradeEvent>, Error> {
    const QUERY: &str =
        "SELECT * FROM trade_events WHERE transaction_hash = $1 AND log_index = $2";
    let row = sqlx::query(QUERY)
        .bind(hash_to_bytes(transaction_hash))
        .bind(log_index)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(row_to_event))
}

/// `UPDATE orders SET status='filled' WHERE maker=? AND nft_address=? AND
/// token_id=? AND status='active'`, per §4.6 step 2. Address comparison is
/// byte-equal on the already-lowercase-normalized `maker`/`nft_address`
/// columns — the caller is responsible for lowercasing chain-emitted
/// (EIP-55 mixed-case) addresses before calling this.
pub async fn fill_active_order(
    pool: &PgPool,
    maker: model::Address,
    nft_address: model::Address,
    token_id: alloy_primitives::U256,
) -> Result<u64, Error> {
    const QUERY: &str = r#"
UPDATE orders SET status = 'filled', updated_at = now()
WHERE maker = $1 AND nft_address = $2 AND token_id = $3 AND status = 'active'
"#;
    let result = sqlx::query(QUERY)
        .bind(address_to_bytes(maker))
        .bind(address_to_bytes(nft_address))
        .bind(u256_to_bigdecimal(token_id))
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
