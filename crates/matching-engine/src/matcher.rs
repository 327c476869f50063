//! §4.4 compatibility predicate and per-tick pairing, lifted out of
//! `run_loop` so it can be unit-tested without a cache or HTTP client.

use cache::record::CachedOrder;
use chrono::{DateTime, Utc};

pub struct MatchCandidate {
    pub ask: CachedOrder,
    pub bid: CachedOrder,
}

fn compatible(ask: &CachedOrder, bid: &CachedOrder) -> bool {
    ask.nft_address == bid.nft_address
        && ask.token_id == bid.token_id
        && ask.payment_token == bid.payment_token
        && bid.price >= ask.price
}

/// §4.4 step 1-2: drop expired entries, then scan bids in iteration order
/// for each ask, emitting the first compatible pair and never reusing an
/// ask or a bid within the same tick.
pub fn match_tick(
    asks: Vec<CachedOrder>,
    bids: Vec<CachedOrder>,
    now: DateTime<Utc>,
) -> Vec<MatchCandidate> {
    let asks: Vec<_> = asks.into_iter().filter(|o| !o.is_expired(now)).collect();
    let mut bids: Vec<_> = bids.into_iter().filter(|o| !o.is_expired(now)).collect();

    let mut pairs = Vec::new();
    for ask in asks {
        let Some(index) = bids.iter().position(|bid| compatible(&ask, bid)) else {
            continue;
        };
        let bid = bids.remove(index);
        pairs.push(MatchCandidate { ask, bid });
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use model::{Address, Side};

    fn order(side: Side, price: u64, token_id: u64) -> CachedOrder {
        CachedOrder {
            id: 1,
            maker: Address::default(),
            nft_address: Address::default(),
            token_id: U256::from(token_id),
            payment_token: Address::default(),
            price: U256::from(price),
            expiry: Utc::now() + chrono::Duration::hours(1),
            nonce: U256::from(0u64),
            side,
            hash: "0x00".to_string(),
            signature: "0x00".to_string(),
        }
    }

    #[test]
    fn bid_equal_to_ask_matches() {
        let ask = order(Side::Ask, 100, 1);
        let bid = order(Side::Bid, 100, 1);
        let pairs = match_tick(vec![ask], vec![bid], Utc::now());
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn bid_strictly_below_ask_does_not_match() {
        let ask = order(Side::Ask, 100, 1);
        let bid = order(Side::Bid, 99, 1);
        let pairs = match_tick(vec![ask], vec![bid], Utc::now());
        assert!(pairs.is_empty());
    }

    #[test]
    fn expired_entries_are_filtered_at_read() {
        let mut ask = order(Side::Ask, 100, 1);
        ask.expiry = Utc::now() - chrono::Duration::seconds(1);
        let bid = order(Side::Bid, 100, 1);
        let pairs = match_tick(vec![ask], vec![bid], Utc::now());
        assert!(pairs.is_empty());
    }

    #[test]
    fn each_ask_and_bid_used_at_most_once_per_tick() {
        let ask_a = order(Side::Ask, 100, 1);
        let ask_b = order(Side::Ask, 100, 1);
        let bid = order(Side::Bid, 100, 1);
        let pairs = match_tick(vec![ask_a, ask_b], vec![bid], Utc::now());
        assert_eq!(pairs.len(), 1);
    }
}
