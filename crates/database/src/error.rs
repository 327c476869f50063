//! Error kinds per §7: `Conflict`/`NotFound` map directly onto this
//! store's two domain-level failures; everything else from sqlx is wrapped
//! as `Internal`/`UpstreamUnavailable` by the caller.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `(maker, nonce)` or `(transaction_hash, log_index)` unique-key
    /// collision — §4.1 `Create` and `InsertTradeEventIfAbsent`.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found")]
    NotFound,
    /// Attempted backward status transition (§3 invariant).
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
