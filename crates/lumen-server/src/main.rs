//! Lumen Server binary.

use lumen_server::{ServerConfig, ServerError, ws_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();
    tracing::info!(host = %config.host, port = config.port, parallel = config.parallel, "starting lumen-server");
    ws_server::run(config).await
}
