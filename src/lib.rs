//! Stock watchlist service
//!
//! Serves quotes and daily history for a CSV-configured watchlist, adding
//! each ticker's number and weight, a colored daily change, and abbreviated
//! magnitudes on top of the upstream market data.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod market;
pub mod services;
pub mod watchlist;

// Re-export commonly used types
pub use api::{app_router, run_server, AppState};
pub use config::AppConfig;
pub use error::{AppError, ProviderError};
pub use market::{MarketDataClient, Quote, RawBar, YahooClient};
pub use watchlist::WatchlistEntry;
