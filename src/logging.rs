use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_FILTER: &str = "info,taglink=debug,taglink_ndef=debug";

static INIT: Once = Once::new();

/// Install the global tracing subscriber, `RUST_LOG` overrides the default filter
///
/// Safe to call more than once, only the first call does anything
pub fn init() {
    INIT.call_once(|| {
        // forward `log` records from dependencies into tracing
        let _ = tracing_log::LogTracer::init();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_ansi(false))
            .try_init();

        match result {
            Ok(()) => tracing::info!("logging initialized, build: {:?}", crate::build::build_info()),
            Err(error) => eprintln!("unable to initialize logging: {error}"),
        }
    });
}

#[uniffi::export]
fn init_logging() {
    init();
}
