//! The JSON shape stored as a hash field value in `orders:active:{ask,bid}`
//! (§4.2, §6 "Cache schema"). Kept as its own serde-friendly DTO rather than
//! deriving `Serialize` on `model::Order` directly, since `model` is
//! intentionally I/O-free (see `crates/model`).

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use model::{Address, Order, Side};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct CachedOrder {
    pub id: i64,
    pub maker: Address,
    #[serde(rename = "nftAddress")]
    pub nft_address: Address,
    #[serde(rename = "tokenId", with = "model::numeric")]
    pub token_id: U256,
    #[serde(rename = "paymentToken")]
    pub payment_token: Address,
    #[serde(with = "model::numeric")]
    pub price: U256,
    pub expiry: DateTime<Utc>,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub side: Side,
    pub hash: String,
    /// Carried so the matching engine can forward it as `makerSignature`
    /// (§4.5) without a round-trip back through C1.
    pub signature: String,
}

impl From<&Order> for CachedOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            maker: order.maker,
            nft_address: order.nft_address,
            token_id: order.token_id,
            payment_token: order.payment_token,
            price: order.price,
            expiry: order.expiry,
            nonce: order.nonce,
            side: order.side,
            hash: order.hash_hex(),
            signature: format!("0x{}", hex::encode(order.signature.0)),
        }
    }
}

impl CachedOrder {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

/// Body published on the `orders:cancelled` advisory channel (§4.2, §4.3
/// step 6): `{orderId, maker, nonce, hash, time}`.
#[derive(Serialize, Deserialize)]
pub struct CancellationAnnouncement {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub maker: Address,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub hash: String,
    pub time: DateTime<Utc>,
}
