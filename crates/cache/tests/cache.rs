//! Integration tests against a live Redis instance. Ignored by default,
//! matching `crates/database/tests/orders.rs`'s convention for services
//! this workspace cannot fake convincingly.

use alloy_primitives::U256;
use cache::OrderBookCache;
use cache::record::CancellationAnnouncement;
use chrono::{Duration, Utc};
use model::{Address, Order, OrderStatus, Side, Signature};

fn sample_order(side: Side) -> Order {
    let now = Utc::now();
    Order {
        id: 1,
        maker: Address::default(),
        nft_address: Address::default(),
        token_id: U256::from(1u64),
        payment_token: Address::default(),
        price: U256::from(1_000u64),
        expiry: now + Duration::hours(1),
        nonce: U256::from(0u64),
        side,
        status: OrderStatus::Active,
        signature: Signature([0u8; 65]),
        hash: [1u8; 32],
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
#[ignore]
async fn put_list_delete_round_trips() {
    let cache = OrderBookCache::connect("127.0.0.1:6379", None)
        .await
        .expect("local redis available");
    let order = sample_order(Side::Ask);

    cache.put(&order).await.unwrap();
    let listed = cache.list_all(Side::Ask).await.unwrap();
    assert!(listed.iter().any(|o| o.hash == order.hash_hex()));

    cache.delete(Side::Ask, &order.hash_hex()).await.unwrap();
    let listed = cache.list_all(Side::Ask).await.unwrap();
    assert!(!listed.iter().any(|o| o.hash == order.hash_hex()));
}

#[tokio::test]
#[ignore]
async fn cancellation_announcement_publishes_without_error() {
    let cache = OrderBookCache::connect("127.0.0.1:6379", None)
        .await
        .expect("local redis available");
    let announcement = CancellationAnnouncement {
        order_id: 1,
        maker: Address::default(),
        nonce: U256::from(0u64),
        hash: "0x00".to_string(),
        time: Utc::now(),
    };
    // No subscriber is required for this to succeed (§4.2: advisory only).
    cache.announce_cancellation(&announcement).await.unwrap();
}
