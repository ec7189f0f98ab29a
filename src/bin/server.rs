//! Aurix quant-engine server
//!
//! HTTP boundary over the market-structure engine: charting feed,
//! multi-timeframe context, health and metrics. Stateless; nothing is
//! persisted between requests.

use aurix::config::{get_environment, Config};
use aurix::core::http::start_server;
use aurix::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env();
    info!("Starting Aurix quant engine");
    info!(environment = %get_environment(), "Environment");
    info!(port = config.http_port, "HTTP Server: http://0.0.0.0:{}", config.http_port);
    if config.alpha_vantage_key.is_none() {
        info!("Primary quote source disabled (no ALPHA_VANTAGE_KEY); waterfall starts at Yahoo");
    }

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down quant engine...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
