use async_trait::async_trait;

use crate::error::ProviderResult;

use super::types::{Quote, RawBar};

/// Source of quotes and historical bars. Every call may fail or return
/// partially populated data.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    fn name(&self) -> &'static str;

    /// Point-in-time quote fields for one ticker.
    async fn get_quote(&self, symbol: &str) -> ProviderResult<Quote>;

    /// Daily OHLCV rows for `period` (an opaque range token such as "6mo"),
    /// oldest first.
    async fn get_history(&self, symbol: &str, period: &str) -> ProviderResult<Vec<RawBar>>;
}
