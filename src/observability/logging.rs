//! Structured logging.
//!
//! Installs a `tracing` subscriber that writes to stderr, so stdout stays
//! reserved for the JSON the CLI prints. `RUST_LOG` wins over the
//! configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("dataproxy_console={}", config.log_level)
}

/// Initialize the global subscriber. Later calls are ignored.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(config).into());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
