//! §4.6 `processLog`: decode one chain log, record it, and flip the status
//! of whichever resting orders it settles.

use anyhow::Context;
use chain::TradeExecuted;
use database::PgPool;
use model::{Address, Side, TradeEvent};

fn to_trade_event(
    event: &TradeExecuted,
    transaction_hash: [u8; 32],
    log_index: i64,
    block_number: i64,
) -> TradeEvent {
    TradeEvent {
        transaction_hash,
        log_index,
        block_number,
        maker: Address::from_alloy(event.maker),
        taker: Address::from_alloy(event.taker),
        nft_address: Address::from_alloy(event.nft),
        token_id: event.tokenId,
        payment_token: Address::from_alloy(event.paymentToken),
        price: event.price,
        side: if event.side == 0 { Side::Ask } else { Side::Bid },
        fee: event.fee,
        inserted_at: chrono::Utc::now(),
    }
}

/// Parses `log` as a `TradeExecuted` event and, if it is one, records it
/// and updates both matched orders to FILLED.
///
/// A duplicate-key insert is not an error (§4.6 step 1) — the function
/// proceeds to step 2 regardless, because a prior attempt may have
/// recorded the event but crashed before flipping order status.
pub async fn process_log(pool: &PgPool, log: &alloy_rpc_types_eth::Log) -> anyhow::Result<()> {
    let Some(event) = chain::decode_trade_executed(log)? else {
        return Ok(());
    };

    let transaction_hash = log
        .transaction_hash
        .context("mined log missing transaction_hash")?
        .0;
    let log_index = log.log_index.context("mined log missing log_index")? as i64;
    let block_number = log.block_number.context("mined log missing block_number")? as i64;

    let trade_event = to_trade_event(&event, transaction_hash, log_index, block_number);

    let inserted = database::trade_events::insert_if_absent(pool, &trade_event).await?;
    if inserted {
        tracing::info!(
            tx_hash = %trade_event.transaction_hash_hex(),
            log_index,
            "recorded trade event"
        );
    } else {
        tracing::info!(
            tx_hash = %trade_event.transaction_hash_hex(),
            log_index,
            "trade event already recorded, updating order status anyway"
        );
    }

    for participant in [trade_event.maker, trade_event.taker] {
        match database::trade_events::fill_active_order(
            pool,
            participant,
            trade_event.nft_address,
            trade_event.token_id,
        )
        .await
        {
            Ok(rows) => {
                if rows > 0 {
                    tracing::info!(maker = %participant, rows, "order filled");
                }
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    maker = %participant,
                    "failed to update order status; trade event already recorded"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, U256};

    use super::*;

    #[test]
    fn side_decodes_from_contract_u8() {
        let event = TradeExecuted {
            maker: address!("1111111111111111111111111111111111111111"),
            taker: address!("2222222222222222222222222222222222222222"),
            nft: address!("3333333333333333333333333333333333333333"),
            tokenId: U256::from(7u64),
            paymentToken: address!("4444444444444444444444444444444444444444"),
            price: U256::from(100u64),
            side: 1,
            fee: U256::from(1u64),
        };
        let record = to_trade_event(&event, [0u8; 32], 0, 1);
        assert_eq!(record.side, Side::Bid);
    }
}
