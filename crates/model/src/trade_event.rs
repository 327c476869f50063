use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use crate::{address::Address, order::Side};

/// One record per observed on-chain `TradeExecuted` log (§3). Append-only;
/// `(transaction_hash, log_index)` is the composite natural key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeEvent {
    pub transaction_hash: [u8; 32],
    pub log_index: i64,
    pub block_number: i64,
    pub maker: Address,
    pub taker: Address,
    pub nft_address: Address,
    pub token_id: U256,
    pub payment_token: Address,
    pub price: U256,
    pub side: Side,
    pub fee: U256,
    pub inserted_at: DateTime<Utc>,
}

impl TradeEvent {
    pub fn transaction_hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.transaction_hash))
    }
}
