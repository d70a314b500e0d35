//! Yahoo Finance API response models.
//!
//! Only the fields the service exposes are modelled; everything else in the
//! payloads is ignored.

use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// quoteSummary
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    pub price: Option<PriceModule>,
    pub summary_detail: Option<SummaryDetailModule>,
    pub default_key_statistics: Option<KeyStatisticsModule>,
    pub financial_data: Option<FinancialDataModule>,
    pub summary_profile: Option<SummaryProfileModule>,
}

/// Yahoo wraps numbers as `{"raw": 1.5, "fmt": "1.50"}`, sends `{}` when a
/// value is unavailable, and occasionally puts strings like "Infinity" in raw.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct RawValue {
    pub raw: Option<Value>,
}

impl RawValue {
    pub fn value(&self) -> Option<f64> {
        self.raw
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

/// Unwrap an optional `{"raw": ...}` field.
pub fn raw(field: &Option<RawValue>) -> Option<f64> {
    field.as_ref().and_then(RawValue::value)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    pub symbol: Option<String>,
    pub long_name: Option<String>,
    pub regular_market_price: Option<RawValue>,
    pub regular_market_volume: Option<RawValue>,
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetailModule {
    pub previous_close: Option<RawValue>,
    pub market_cap: Option<RawValue>,
    pub day_high: Option<RawValue>,
    pub day_low: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
    pub dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatisticsModule {
    pub shares_outstanding: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataModule {
    pub current_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryProfileModule {
    pub sector: Option<String>,
}

// ============================================================================
// v8 chart
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartResult,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub meta: Option<ChartMeta>,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds
    pub gmtoffset: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicators>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteIndicators {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}
