use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::TracingConfig;

const DEFAULT_FILTER: &str = "info,lexiscan=debug,tower_http=debug";

/// Initialize the tracing subscriber with structured logging. `RUST_LOG`
/// overrides the default filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port,
        environment = %config.environment,
        json_format = config.json_format,
        "Server initialized"
    );
}
