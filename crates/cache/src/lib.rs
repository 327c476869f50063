//! C2, the Live Order-Book Cache (§4.2): a best-effort Redis index over
//! active orders, used only by the matching engine. C1 remains the
//! authoritative store; nothing here is ever read back as ground truth.

pub mod record;

use model::{Order, Side};
use record::{CachedOrder, CancellationAnnouncement};
use redis::{aio::ConnectionManager, AsyncCommands};

pub const CANCELLED_CHANNEL: &str = "orders:cancelled";

fn hash_key(side: Side) -> &'static str {
    match side {
        Side::Ask => "orders:active:ask",
        Side::Bid => "orders:active:bid",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("failed to (de)serialize cached order: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct OrderBookCache {
    conn: ConnectionManager,
}

impl OrderBookCache {
    pub async fn connect(addr: &str, password: Option<&str>) -> Result<Self, Error> {
        let url = match password {
            Some(password) => {
                let (scheme_and_host, _) = addr
                    .split_once("://")
                    .map(|(scheme, rest)| (scheme, rest))
                    .unwrap_or(("redis", addr));
                format!("{scheme_and_host}://:{password}@{addr}")
            }
            None if addr.contains("://") => addr.to_string(),
            None => format!("redis://{addr}"),
        };
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// §4.2 `Put(side, hash, record)`.
    pub async fn put(&self, order: &Order) -> Result<(), Error> {
        let record = CachedOrder::from(order);
        let payload = serde_json::to_string(&record)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset(hash_key(order.side), order.hash_hex(), payload)
            .await?;
        Ok(())
    }

    /// §4.2 `Delete(side, hash)`.
    pub async fn delete(&self, side: Side, hash_hex: &str) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn.hdel(hash_key(side), hash_hex).await?;
        Ok(())
    }

    /// §4.2 `ListAll(side)`. Expiry filtering is the caller's
    /// responsibility (§4.2: "Expired orders returned by `ListAll` are
    /// filtered by the caller") — the matcher (§4.4 step 1) is the one
    /// caller that does this.
    pub async fn list_all(&self, side: Side) -> Result<Vec<CachedOrder>, Error> {
        let mut conn = self.conn.clone();
        let entries: Vec<(String, String)> = conn.hgetall(hash_key(side)).await?;
        entries
            .into_iter()
            .map(|(_, json)| serde_json::from_str(&json).map_err(Error::from))
            .collect()
    }

    /// §4.2's advisory `orders:cancelled` pub/sub topic. "The channel is
    /// advisory (no consumer is required for correctness)" — callers
    /// should treat a publish failure as non-fatal (§4.3 step 6: "Failure
    /// to publish is ignored").
    pub async fn announce_cancellation(
        &self,
        announcement: &CancellationAnnouncement,
    ) -> Result<(), Error> {
        let payload = serde_json::to_string(announcement)?;
        let mut conn = self.conn.clone();
        let _: () = conn.publish(CANCELLED_CHANNEL, payload).await?;
        Ok(())
    }

    /// Warms the cache from C1's active-order set. Not documented nor
    /// implemented in the original (§9 "Cache rebuild on restart" open
    /// question) — this resolves that open question by doing it on every
    /// startup, the way the note recommends.
    pub async fn rebuild_from(&self, active_orders: &[Order]) -> Result<(), Error> {
        for order in active_orders {
            self.put(order).await?;
        }
        Ok(())
    }
}
