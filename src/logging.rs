use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,gtk4=warn,ksni=warn";

static INIT: Once = Once::new();

/// Installs the stderr subscriber. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .compact();

        if let Err(err) = tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init()
        {
            eprintln!("prompt-manager: tracing subscriber already installed: {err}");
        }
    });
}
