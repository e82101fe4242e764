use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

use infohub::{telemetry, Config, InfoHub, Transport};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let cli_transport = std::env::args().nth(1);
    let config = Config::from_env(cli_transport.as_deref())?;

    if config.openweather_key.is_some() {
        tracing::info!("OPENWEATHER_KEY set, keyed weather provider enabled");
    }

    let transport = config.transport;
    let addr = config.addr.clone();
    let hub = InfoHub::new(config)?;

    match transport {
        Transport::Http => {
            tracing::info!("Starting InfoHub HTTP proxy");
            infohub::http::run(Arc::new(hub), &addr).await?;
        }
        Transport::Mcp => {
            tracing::info!("Starting InfoHub MCP server");
            let server = hub.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
