//! Traffic Advisor - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Traffic Advisor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env()?;
    run_server(config).await?;

    Ok(())
}
