//! Tracing setup for the `rag` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber. `RUST_LOG` overrides `level`.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();
}
