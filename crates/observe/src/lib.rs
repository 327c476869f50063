//! Ambient logging and metrics wiring shared by all four binaries. A
//! trimmed-down version of the teacher's `observe` crate: the OpenTelemetry
//! exporter, the `tokio-console` subscriber and the jemalloc profiling hook
//! are dropped (no collector exists for this system — see `DESIGN.md`);
//! `tracing-subscriber` and `prometheus` are kept as-is.

pub mod metrics;
pub mod tracing_setup;

pub use tracing_setup::initialize as init_tracing;
