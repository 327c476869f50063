//! Integration tests against a live Postgres instance. Ignored by default,
//! matching the teacher's convention (`crates/database/src/byte_array.rs`)
//! of leaving DB-backed tests opt-in via `cargo test -- --ignored`.

use alloy_primitives::U256;
use chrono::{Duration, Utc};
use database::{orders, PgPool};
use model::{Address, Order, OrderStatus, Side, Signature};

async fn pool() -> PgPool {
    database::connect("postgresql://", 2)
        .await
        .expect("local postgres available")
}

fn sample_order(maker: Address, nonce: U256) -> Order {
    let now = Utc::now();
    Order {
        id: 0,
        maker,
        nft_address: Address::default(),
        token_id: U256::from(1u64),
        payment_token: Address::default(),
        price: U256::from(1_000_000_000_000_000_000u128),
        expiry: now + Duration::hours(1),
        nonce,
        side: Side::Ask,
        status: OrderStatus::Active,
        signature: Signature([7u8; 65]),
        hash: [9u8; 32],
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
#[ignore]
async fn create_enforces_maker_nonce_uniqueness() {
    let pool = pool().await;
    let maker: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        .parse()
        .unwrap();
    let order = sample_order(maker, U256::from(1u64));

    let created = orders::create(&pool, &order).await.unwrap();
    assert_eq!(created.maker, maker);

    let conflict = orders::create(&pool, &order).await;
    assert!(matches!(conflict, Err(database::Error::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn update_status_is_idempotent_and_refuses_backward_transitions() {
    let pool = pool().await;
    let maker: Address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
        .parse()
        .unwrap();
    let order = orders::create(&pool, &sample_order(maker, U256::from(2u64)))
        .await
        .unwrap();

    let cancelled = orders::update_status(&pool, order.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // Idempotent no-op.
    let again = orders::update_status(&pool, order.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(again.status, OrderStatus::Cancelled);

    // Backward transition refused.
    let err = orders::update_status(&pool, order.id, OrderStatus::Active).await;
    assert!(matches!(err, Err(database::Error::IllegalTransition { .. })));
}
