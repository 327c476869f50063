//! The outbound `POST /internal/execute` body (§4.5), matching the
//! contract's 8-field order tuple. Deliberately duplicated rather than
//! shared with `execution-service` through a common crate — each service
//! owns its boundary type, the way `order-service`'s DTOs are separate from
//! `model::Order`.

use alloy_primitives::U256;
use model::Address;
use serde::Serialize;

use crate::matcher::MatchCandidate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTupleDto {
    pub maker: Address,
    pub nft: Address,
    #[serde(with = "model::numeric")]
    pub token_id: U256,
    pub payment_token: Address,
    #[serde(with = "model::numeric")]
    pub price: U256,
    #[serde(with = "model::numeric")]
    pub expiry: U256,
    #[serde(with = "model::numeric")]
    pub nonce: U256,
    pub side: u8,
}

impl OrderTupleDto {
    fn from_cached(order: &cache::record::CachedOrder, side: u8) -> Self {
        Self {
            maker: order.maker,
            nft: order.nft_address,
            token_id: order.token_id,
            payment_token: order.payment_token,
            price: order.price,
            expiry: U256::from(order.expiry.timestamp().max(0) as u64),
            nonce: order.nonce,
            side,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub maker_order: OrderTupleDto,
    pub taker_order: OrderTupleDto,
    pub maker_signature: String,
}

impl From<&MatchCandidate> for ExecuteRequest {
    /// The ask is the resting order (`maker`); the bid is the order that
    /// crossed it (`taker`). Only the maker's signature travels on-chain —
    /// see §4.5: "accepting {makerOrder, takerOrder, makerSignature}".
    fn from(pair: &MatchCandidate) -> Self {
        Self {
            maker_order: OrderTupleDto::from_cached(&pair.ask, 0),
            taker_order: OrderTupleDto::from_cached(&pair.bid, 1),
            maker_signature: pair.ask.signature.clone(),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[allow(dead_code)]
    pub tx_hash: String,
    #[allow(dead_code)]
    pub status: String,
}
