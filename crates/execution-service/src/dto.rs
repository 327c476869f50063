use alloy_primitives::U256;
use model::Address;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub maker_order: OrderTupleDto,
    pub taker_order: OrderTupleDto,
    pub maker_signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub tx_hash: String,
    pub status: &'static str,
}
