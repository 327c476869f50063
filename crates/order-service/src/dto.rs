//! Wire DTOs for C3's HTTP surface (§4.3). `model::Address`/`model::Signature`
//! already normalize and validate on deserialize (steps 1 and 5 of the
//! create-order operation happen for free via `serde`); this module only
//! adds the fields those types don't cover.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use model::{Address, Order, OrderStatus, Side, Signature};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub maker: Address,
    pub nft_address: Address,
    #[serde(with = "model::numeric")]
    pub token_id: U256,
    pub payment_token: Address,
    #[serde(with = "model::numeric")]
    pub price: U256,
    pub expiry: i64,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub side: Side,
    pub signature: Signature,
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub side: Option<Side>,
    pub collection: Option<Address>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub maker: Address,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub signature: Signature,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub maker: Address,
    pub nft_address: Address,
    #[serde(with = "model::numeric")]
    pub token_id: U256,
    pub payment_token: Address,
    #[serde(with = "model::numeric")]
    pub price: U256,
    pub expiry: i64,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub side: Side,
    pub status: String,
    pub hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            maker: order.maker,
            nft_address: order.nft_address,
            token_id: order.token_id,
            payment_token: order.payment_token,
            price: order.price,
            expiry: order.expiry.timestamp(),
            nonce: order.nonce,
            side: order.side,
            status: order.status.to_string(),
            hash: order.hash_hex(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
}

pub fn parse_status(s: &str) -> Result<OrderStatus, String> {
    s.parse().map_err(|_| format!("unknown status {s}"))
}
