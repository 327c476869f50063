//! §4.5's nonce discipline: transactions carry strictly increasing,
//! gap-free nonces under concurrent requests. The RPC lookup happens while
//! holding the lock — slower than querying outside it, but it removes the
//! TOCTOU window between "read N_chain" and "rebase P" that a lock-free
//! read would leave open between two racing requests.

use alloy_primitives::Address;
use tokio::sync::Mutex;

use chain::ChainClient;

pub struct NonceManager {
    pending: Mutex<Option<u64>>,
}

impl NonceManager {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// §4.5 steps 2-3: `P <- max(P, N_chain)`; assign `n := P`; `P <- P+1`.
    ///
    /// On a submission failure the caller does nothing further here — per
    /// §9 "Nonce rollback on failure" this workspace implements
    /// advance-and-rebase, not decrement: `P` stays at `n+1` and the next
    /// request's `max(P, N_chain)` absorbs the gap once the chain catches
    /// up, rather than risking a `decrement`/`max` race that could hand out
    /// the same nonce twice.
    pub async fn assign_nonce(
        &self,
        client: &ChainClient<alloy_provider::DynProvider>,
        executor: Address,
    ) -> anyhow::Result<u64> {
        let mut guard = self.pending.lock().await;
        let chain_pending = client.pending_nonce(executor).await?;
        let assigned = guard.map_or(chain_pending, |p| p.max(chain_pending));
        *guard = Some(assigned + 1);
        Ok(assigned)
    }
}

impl Default for NonceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unassigned() {
        let manager = NonceManager::new();
        assert!(manager.pending.try_lock().unwrap().is_none());
    }
}
