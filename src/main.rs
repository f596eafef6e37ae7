use storefront_admin::{router, setup_tracing, AppConfig, StorefrontSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    info!(
        listen_addr = %config.server.listen_addr,
        store_api = %config.store_api.base_url,
        "Starting storefront"
    );

    let system = StorefrontSystem::new(&config).map_err(|e| e.to_string())?;
    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .map_err(|e| e.to_string())?;

    let served = axum::serve(listener, router(system.state()))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await;
    if let Err(e) = &served {
        error!("Server error: {}", e);
    }

    system.shutdown().await?;
    served.map_err(|e| e.to_string())
}
