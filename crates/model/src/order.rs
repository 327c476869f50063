use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Which side of the book an order sits on.
///
/// Wire encoding is the lowercase string ("ask"/"bid"); typed-data encoding
/// (§4.3) is `0=ASK, 1=BID`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    /// The `uint8` encoded into the EIP-712 `Order` struct.
    pub fn as_typed_data_u8(self) -> u8 {
        match self {
            Side::Ask => 0,
            Side::Bid => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Ask => Side::Bid,
            Side::Bid => Side::Ask,
        }
    }
}

/// Status monotonically progresses ACTIVE -> {CANCELLED, FILLED}; see §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Active,
    Cancelled,
    Filled,
}

impl OrderStatus {
    /// Whether `self -> next` is a legal transition under §3's monotonic
    /// progression invariant. A transition to the same status is legal
    /// (idempotent no-op, per C1.UpdateStatus).
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (a, b) if a == b => true,
            (OrderStatus::Active, OrderStatus::Cancelled | OrderStatus::Filled) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Active => "active",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Filled => "filled",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OrderStatus::Active),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "filled" => Ok(OrderStatus::Filled),
            other => Err(format!("unknown order status {other}")),
        }
    }
}

/// A 65-byte `r || s || v` ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 65]);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Signature {
    pub fn from_hex(s: &str) -> Result<Self, SignatureParseError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        let array: [u8; 65] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| SignatureParseError::WrongLength(v.len()))?;
        Ok(Self(array))
    }

    /// Normalizes the recovery byte to `{0, 1}`; accepts the legacy `{27,
    /// 28}` convention per §4.3 step 6.
    pub fn normalized_recovery_id(&self) -> Result<u8, SignatureParseError> {
        match self.0[64] {
            0 | 1 => Ok(self.0[64]),
            27 | 28 => Ok(self.0[64] - 27),
            other => Err(SignatureParseError::InvalidRecoveryId(other)),
        }
    }

    pub fn r(&self) -> [u8; 32] {
        self.0[0..32].try_into().unwrap()
    }

    pub fn s(&self) -> [u8; 32] {
        self.0[32..64].try_into().unwrap()
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureParseError {
    #[error("invalid signature hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("signature must decode to 65 bytes, got {0}")]
    WrongLength(usize),
    #[error("invalid recovery id byte {0}, expected 0/1/27/28")]
    InvalidRecoveryId(u8),
}

/// The central entity of §3: a signed, store-persisted order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub maker: Address,
    pub nft_address: Address,
    pub token_id: U256,
    pub payment_token: Address,
    pub price: U256,
    pub expiry: DateTime<Utc>,
    pub nonce: U256,
    pub side: Side,
    pub status: OrderStatus,
    pub signature: Signature,
    /// The EIP-712 typed-data digest this signature was produced over.
    pub hash: [u8; 32],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

/// Compatibility predicate between an ask and a bid, per §4.4.
///
/// Clearing price is always `ask.price` — the maker receives exactly the
/// asked amount in v1 (no partial fills, no price improvement split).
pub fn orders_compatible(ask: &Order, bid: &Order) -> bool {
    debug_assert_eq!(ask.side, Side::Ask);
    debug_assert_eq!(bid.side, Side::Bid);
    ask.nft_address == bid.nft_address
        && ask.token_id == bid.token_id
        && ask.payment_token == bid.payment_token
        && bid.price >= ask.price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_progresses_monotonically() {
        assert!(OrderStatus::Active.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Active.can_transition_to(OrderStatus::Filled));
        assert!(OrderStatus::Active.can_transition_to(OrderStatus::Active));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Active));
        assert!(!OrderStatus::Filled.can_transition_to(OrderStatus::Active));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Filled));
    }

    #[test]
    fn normalizes_legacy_recovery_id() {
        let mut bytes = [0u8; 65];
        bytes[64] = 27;
        let sig = Signature(bytes);
        assert_eq!(sig.normalized_recovery_id().unwrap(), 0);
        bytes[64] = 28;
        assert_eq!(Signature(bytes).normalized_recovery_id().unwrap(), 1);
        bytes[64] = 1;
        assert_eq!(Signature(bytes).normalized_recovery_id().unwrap(), 1);
        bytes[64] = 99;
        assert!(Signature(bytes).normalized_recovery_id().is_err());
    }

    #[test]
    fn bid_equal_to_ask_matches_strictly_lower_does_not() {
        let mut ask = sample_order(Side::Ask, U256::from(100u64));
        let mut bid = sample_order(Side::Bid, U256::from(100u64));
        assert!(orders_compatible(&ask, &bid));

        bid.price = U256::from(99u64);
        assert!(!orders_compatible(&ask, &bid));

        bid.price = U256::from(101u64);
        assert!(orders_compatible(&ask, &bid));

        // case-insensitive address match only applies pre-normalization;
        // once stored, addresses differ bytewise iff the tokens differ.
        ask.token_id = U256::from(2u64);
        bid.token_id = U256::from(1u64);
        bid.price = U256::from(100u64);
        assert!(!orders_compatible(&ask, &bid));
    }

    fn sample_order(side: Side, price: U256) -> Order {
        let now = Utc::now();
        Order {
            id: 0,
            maker: Address::default(),
            nft_address: Address::default(),
            token_id: U256::from(1u64),
            payment_token: Address::default(),
            price,
            expiry: now,
            nonce: U256::from(0u64),
            side,
            status: OrderStatus::Active,
            signature: Signature([0u8; 65]),
            hash: [0u8; 32],
            created_at: now,
            updated_at: now,
        }
    }
}
