//! Metal Sniper API Server
//!
//! HTTP API with health check, metrics, signal endpoints and the
//! authenticated evaluation trigger.

use dotenvy::dotenv;
use metal_sniper::config::AppConfig;
use metal_sniper::core::http::start_server;
use metal_sniper::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    let env = metal_sniper::config::get_environment();
    info!("Starting Metal Sniper API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
