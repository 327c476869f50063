//! C1, the Signed-Order Store (§4.1): a Postgres-backed relational store for
//! orders, trade events and the indexer checkpoint.
//!
//! Schema is managed by versioned SQL under `migrations/` at the repository
//! root, not by this process at startup — see §9 "Auto-migration": the
//! process assumes the schema already exists and fails fast (via a plain
//! connection error) if it doesn't.

pub mod byte_array;
pub mod checkpoint;
pub mod error;
pub mod numeric;
pub mod orders;
pub mod trade_events;

pub use error::Error;
pub use sqlx::PgPool;

/// Opens the pool used by every binary; sized for `request-count + 2`
/// concurrent operations per §5 "Shared resources: DB connection pool".
pub async fn connect(dsn: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(dsn)
        .await
}
