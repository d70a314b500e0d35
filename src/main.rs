use std::sync::Arc;

use stock_watchlist::{
    config::AppConfig, error::AppError, market::YahooClient, run_server, watchlist::load_watchlist,
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Local overrides for BIND_ADDR, WATCHLIST_PATH, RUST_LOG, ...
    dotenvy::dotenv().ok();

    // Setup Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting stock watchlist service...");

    // Load Configuration
    let config = AppConfig::load()?;
    info!("Loaded Configuration: {:?}", config);

    let watchlist = load_watchlist(&config.watchlist_path)?;

    let market = YahooClient::new(config.provider.clone())?;
    info!(
        "Market data via Yahoo (timeout {}s, fetch concurrency {})",
        config.provider.timeout_secs, config.fetch_concurrency
    );

    let app_state = Arc::new(AppState {
        config,
        watchlist,
        market: Arc::new(market),
    });

    run_server(app_state).await
}
