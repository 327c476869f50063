//! §4.6 reconciliation loop: the safety net that guarantees correctness
//! even with no live subscription running.

use std::time::Duration;

use alloy_provider::DynProvider;
use chain::ChainClient;
use database::PgPool;

use crate::process_log::process_log;

const SUB_BATCH_BLOCKS: u64 = 1_000;
const MAX_RANGE: u64 = 100_000;
const MAX_BACKOFF: Duration = Duration::from_secs(5 * 60);
const MAX_CONSECUTIVE_FAILURES: u32 = 10;

pub struct Reconciler {
    pool: PgPool,
    chain: ChainClient<DynProvider>,
    base_interval: Duration,
}

impl Reconciler {
    pub fn new(pool: PgPool, chain: ChainClient<DynProvider>, base_interval: Duration) -> Self {
        Self {
            pool,
            chain,
            base_interval,
        }
    }

    pub async fn run_forever(&self) -> ! {
        let mut interval = self.base_interval;
        let mut consecutive_failures: u32 = 0;

        loop {
            match self.reconcile_once().await {
                Ok(()) => {
                    if consecutive_failures > 0 {
                        tracing::info!(
                            previous_failures = consecutive_failures,
                            "reconciliation recovered, resetting interval"
                        );
                    }
                    consecutive_failures = 0;
                    interval = self.base_interval;
                }
                Err(err) => {
                    consecutive_failures += 1;
                    let exponent = consecutive_failures.min(MAX_CONSECUTIVE_FAILURES * 2);
                    interval = self
                        .base_interval
                        .checked_mul(2u32.saturating_pow(exponent))
                        .unwrap_or(MAX_BACKOFF)
                        .min(MAX_BACKOFF);
                    tracing::error!(
                        error = %err,
                        consecutive_failures,
                        next_interval_secs = interval.as_secs(),
                        "reconciliation cycle failed"
                    );
                    if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                        tracing::error!(
                            consecutive_failures,
                            "reconciliation has failed 10+ times consecutively; operator attention required"
                        );
                    }
                }
            }

            tokio::time::sleep(interval).await;
        }
    }

    /// One reconciliation cycle: `checkpoint+1 ..= currentBlock`, clamped to
    /// `MAX_RANGE` and walked in `SUB_BATCH_BLOCKS`-sized sub-batches, with
    /// the checkpoint advanced after each sub-batch so a failure partway
    /// through still preserves prior progress.
    pub async fn reconcile_once(&self) -> anyhow::Result<()> {
        let current_block = self.chain.current_block_number().await?;
        let checkpoint = database::checkpoint::get_checkpoint(&self.pool).await?;

        let from = checkpoint as u64 + 1;
        let mut to = current_block;

        if to < from {
            tracing::debug!(checkpoint, current_block, "no new blocks to reconcile");
            return Ok(());
        }

        if to - from + 1 > MAX_RANGE {
            to = from + MAX_RANGE - 1;
            tracing::warn!(
                from,
                original_to = current_block,
                clamped_to = to,
                "block range exceeds MAX_RANGE, clamping"
            );
        }

        tracing::info!(from, to, "starting reconciliation cycle");

        let mut batch_start = from;
        while batch_start <= to {
            let batch_end = (batch_start + SUB_BATCH_BLOCKS - 1).min(to);

            let logs = self.chain.get_logs(batch_start, batch_end).await?;
            tracing::debug!(batch_start, batch_end, count = logs.len(), "fetched logs");

            for log in &logs {
                if let Err(err) = process_log(&self.pool, log).await {
                    tracing::error!(
                        error = %err,
                        tx_hash = ?log.transaction_hash,
                        "failed to process log, continuing with remaining logs"
                    );
                }
            }

            database::checkpoint::update_checkpoint(&self.pool, batch_end as i64).await?;
            batch_start = batch_end + 1;
        }

        tracing::info!(from, to, "reconciliation cycle complete");
        Ok(())
    }
}
