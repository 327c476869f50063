use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a global `tracing` subscriber. `log_filter` is a
/// `tracing_subscriber::EnvFilter` directive string (e.g. `"info"`,
/// `"order_service=debug,info"`); `RUST_LOG` overrides it if set.
pub fn initialize(log_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
