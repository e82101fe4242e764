//! Process-wide logging setup.

use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. Call once at startup; later calls are no-ops.
///
/// Logs go to stderr so stdout stays free for the MCP stdio transport.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "infohub=info,tower_http=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
