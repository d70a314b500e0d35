//! History cleaning: provider bars to date-stamped OHLCV points.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ProviderResult;
use crate::market::{MarketDataClient, RawBar};

/// One cleaned daily bar. Prices are always present; volume may be null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryPoint {
    /// ISO-8601 trading day at midnight in the exchange's offset
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl HistoryPoint {
    /// `None` if any of open/high/low/close is missing or not finite.
    pub fn from_bar(bar: &RawBar) -> Option<Self> {
        let open = finite(bar.open)?;
        let high = finite(bar.high)?;
        let low = finite(bar.low)?;
        let close = finite(bar.close)?;

        let midnight = bar.timestamp.date_naive().and_hms_opt(0, 0, 0)?;
        let date = bar
            .timestamp
            .timezone()
            .from_local_datetime(&midnight)
            .single()?
            .format("%Y-%m-%dT%H:%M:%S%:z")
            .to_string();

        Some(Self {
            date,
            open,
            high,
            low,
            close,
            volume: bar.volume,
        })
    }
}

/// Keep only bars with all four prices, preserving provider order.
pub fn clean_history(bars: &[RawBar]) -> Vec<HistoryPoint> {
    bars.iter().filter_map(HistoryPoint::from_bar).collect()
}

/// Fetch `period` of daily history for `symbol` and clean it.
pub async fn fetch_history(
    client: &dyn MarketDataClient,
    symbol: &str,
    period: &str,
) -> ProviderResult<Vec<HistoryPoint>> {
    let bars = client.get_history(symbol, period).await.map_err(|e| {
        warn!("Error fetching history for {} ({}): {}", symbol, period, e);
        e
    })?;

    Ok(clean_history(&bars))
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
