use sqlx::{PgPool, Row};

use crate::error::Error;

/// §3 `IndexerCheckpoint`: singleton row holding the highest fully-processed
/// block number. `id` is always `1`.
pub async fn get_checkpoint(pool: &PgPool) -> Result<i64, Error> {
    const QUERY: &str = "SELECT last_processed_block FROM indexer_status WHERE id = 1";
    let row = sqlx::query(QUERY).fetch_optional(pool).await?;
    Ok(row.map(|row| row.get::<i64, _>("last_processed_block")).unwrap_or(0))
}

/// Updates under the same policy as event inserts (§4.6): called after each
/// sub-batch completes, so a failure partway through a reconciliation cycle
/// still leaves the checkpoint advanced past everything processed so far.
pub async fn update_checkpoint(pool: &PgPool, block: i64) -> Result<(), Error> {
    const QUERY: &str = r#"
INSERT INTO indexer_status (id, last_processed_block, updated_at)
VALUES (1, $1, now())
ON CONFLICT (id) DO UPDATE SET last_processed_block = $1, updated_at = now()
"#;
    sqlx::query(QUERY).bind(block).execute(pool).await?;
    Ok(())
}
