pub mod process_log;
pub mod reconcile;

pub use reconcile::Reconciler;
