//! Application-wide constants and magic numbers
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make the service easier to tune.

/// Display formatting constants
pub mod formatting {
    /// Placeholder rendered for any value the provider did not supply
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Background color used when no daily change can be computed
    pub const WHITE: &str = "#FFFFFF";

    /// Absolute daily change (in percent) at which the gradient saturates
    pub const GRADIENT_FULL_SCALE_PERCENT: f64 = 5.0;

    pub const TRILLION: f64 = 1e12;
    pub const BILLION: f64 = 1e9;
    pub const MILLION: f64 = 1e6;
}

/// Upstream provider constants
pub mod provider {
    use std::time::Duration;

    pub const DEFAULT_QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com";
    pub const DEFAULT_CHART_BASE_URL: &str = "https://query2.finance.yahoo.com";
    pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

    pub const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// quoteSummary modules that together cover every quote field we expose
    pub const QUOTE_SUMMARY_MODULES: &str =
        "price,summaryDetail,defaultKeyStatistics,financialData,summaryProfile";

    /// Bar size requested for history lookups
    pub const HISTORY_INTERVAL: &str = "1d";
}

/// HTTP server constants
pub mod server {
    pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
    pub const DEFAULT_WATCHLIST_PATH: &str = "stock_tickers.csv";
    pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
    pub const DEFAULT_HISTORY_PERIOD: &str = "6mo";
    pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

    pub const HISTORY_ERROR_MESSAGE: &str = "Failed to fetch stock history.";
}
