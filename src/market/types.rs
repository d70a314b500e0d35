use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Snapshot of current market fields for a ticker. The provider may omit
/// any of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Option<String>,
    pub long_name: Option<String>,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub sector: Option<String>,
}

/// One provider bar before cleaning; any price field may be missing.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBar {
    /// Bar timestamp in the exchange's UTC offset
    pub timestamp: DateTime<FixedOffset>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}
