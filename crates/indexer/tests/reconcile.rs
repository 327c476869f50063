//! Integration tests against a live Postgres instance. Ignored by default,
//! matching the convention in `crates/database/tests`.

use alloy_primitives::{address, U256};
use chain::TradeExecuted;
use database::PgPool;
use model::{Address, Order, OrderStatus, Side, Signature};

async fn pool() -> PgPool {
    database::connect("postgresql://", 2)
        .await
        .expect("local postgres available")
}

fn sample_order(maker: Address, nft: Address, token_id: U256) -> Order {
    let now = chrono::Utc::now();
    Order {
        id: 0,
        maker,
        nft_address: nft,
        token_id,
        payment_token: Address::default(),
        price: U256::from(1_000_000_000_000_000_000u128),
        expiry: now + chrono::Duration::hours(1),
        nonce: U256::from(1u64),
        side: Side::Ask,
        status: OrderStatus::Active,
        signature: Signature([7u8; 65]),
        hash: [1u8; 32],
        created_at: now,
        updated_at: now,
    }
}

fn sample_event(maker: alloy_primitives::Address, taker: alloy_primitives::Address) -> TradeExecuted {
    TradeExecuted {
        maker,
        taker,
        nft: address!("3333333333333333333333333333333333333333"),
        tokenId: U256::from(42u64),
        paymentToken: Address::default().to_alloy(),
        price: U256::from(1_000_000_000_000_000_000u128),
        side: 0,
        fee: U256::from(25u64),
    }
}

#[tokio::test]
#[ignore]
async fn reprocessing_the_same_log_does_not_error_and_fills_orders() {
    let pool = pool().await;

    let maker_addr: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        .parse()
        .unwrap();
    let taker_addr: Address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
        .parse()
        .unwrap();
    let nft: Address = "0x3333333333333333333333333333333333333333".parse().unwrap();

    let maker_order =
        database::orders::create(&pool, &sample_order(maker_addr, nft, U256::from(42u64)))
            .await
            .unwrap();
    let mut taker_order_record = sample_order(taker_addr, nft, U256::from(42u64));
    taker_order_record.nonce = U256::from(2u64);
    taker_order_record.side = Side::Bid;
    let taker_order = database::orders::create(&pool, &taker_order_record)
        .await
        .unwrap();

    let event = sample_event(maker_addr.to_alloy(), taker_addr.to_alloy());
    let trade_event = model::TradeEvent {
        transaction_hash: [42u8; 32],
        log_index: 0,
        block_number: 100,
        maker: maker_addr,
        taker: taker_addr,
        nft_address: nft,
        token_id: event.tokenId,
        payment_token: Address::default(),
        price: event.price,
        side: Side::Ask,
        fee: event.fee,
        inserted_at: chrono::Utc::now(),
    };

    let first_insert = database::trade_events::insert_if_absent(&pool, &trade_event)
        .await
        .unwrap();
    assert!(first_insert);
    let second_insert = database::trade_events::insert_if_absent(&pool, &trade_event)
        .await
        .unwrap();
    assert!(!second_insert, "duplicate insert must not error and must report false");

    database::trade_events::fill_active_order(&pool, maker_addr, nft, U256::from(42u64))
        .await
        .unwrap();
    database::trade_events::fill_active_order(&pool, taker_addr, nft, U256::from(42u64))
        .await
        .unwrap();

    let maker_after = database::orders::find_by_id(&pool, maker_order.id)
        .await
        .unwrap();
    let taker_after = database::orders::find_by_id(&pool, taker_order.id)
        .await
        .unwrap();
    assert_eq!(maker_after.status, OrderStatus::Filled);
    assert_eq!(taker_after.status, OrderStatus::Filled);

    // Idempotent: filling again affects zero rows, no error.
    let rows = database::trade_events::fill_active_order(&pool, maker_addr, nft, U256::from(42u64))
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
#[ignore]
async fn checkpoint_advances_progressively() {
    let pool = pool().await;
    let start = database::checkpoint::get_checkpoint(&pool).await.unwrap();

    database::checkpoint::update_checkpoint(&pool, start + 1_000)
        .await
        .unwrap();
    assert_eq!(
        database::checkpoint::get_checkpoint(&pool).await.unwrap(),
        start + 1_000
    );

    database::checkpoint::update_checkpoint(&pool, start + 2_000)
        .await
        .unwrap();
    assert_eq!(
        database::checkpoint::get_checkpoint(&pool).await.unwrap(),
        start + 2_000
    );
}
