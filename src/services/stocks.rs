//! Watchlist board: fetch every quote, derive daily change, optionally sort,
//! then format for display.
//!
//! Sorting works on [`StockRow`], whose magnitudes are still numbers.
//! Only [`StockRow::into_view`] turns them into display strings, so
//! formatting can never run before the sort.

use std::cmp::Ordering;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::formatting::NOT_AVAILABLE;
use crate::error::ProviderError;
use crate::market::{MarketDataClient, Quote};
use crate::watchlist::WatchlistEntry;

use super::formatter::{daily_change_percent, format_magnitude, gradient_color, raw_change_percent};

/// Outcome of fetching one watchlist ticker.
#[derive(Debug)]
pub struct FetchOutcome {
    pub entry: WatchlistEntry,
    pub result: Result<Quote, ProviderError>,
}

/// A successfully fetched quote with derived fields, before formatting.
#[derive(Clone, Debug, PartialEq)]
pub struct StockRow {
    pub entry: WatchlistEntry,
    pub quote: Quote,
    pub daily_change_percent: Option<f64>,
    pub daily_change_color: String,
}

/// Wire representation of one board row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuoteView {
    pub symbol: String,
    pub long_name: String,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: String,
    pub volume: String,
    pub shares_outstanding: String,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub sector: String,
    #[serde(rename = "Number")]
    pub number: i64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    pub daily_change_percent: Option<f64>,
    pub daily_change_color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
    None,
}

impl SortOrder {
    /// Only "asc" and "desc" sort; anything else leaves watchlist order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::None,
        }
    }
}

/// Comparable value of one column for one row.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Missing numbers sort as 0, including for fields that can go
    /// negative. Missing text sorts as "N/A".
    fn number(v: Option<f64>) -> Self {
        SortKey::Number(v.unwrap_or(0.0))
    }

    fn text(v: &Option<String>) -> Self {
        SortKey::Text(v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()))
    }

    /// Numbers order before text if a column ever mixes them.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl StockRow {
    pub fn new(entry: WatchlistEntry, quote: Quote) -> Self {
        let daily_change_percent = daily_change_percent(quote.current_price, quote.previous_close);
        // Color follows the unrounded change
        let daily_change_color =
            gradient_color(raw_change_percent(quote.current_price, quote.previous_close));

        Self {
            entry,
            quote,
            daily_change_percent,
            daily_change_color,
        }
    }

    /// Sort key for a wire column name. Unknown columns give 0 for every
    /// row, so sorting on them is a no-op.
    pub fn sort_key(&self, column: &str) -> SortKey {
        let q = &self.quote;
        match column {
            "symbol" => SortKey::text(&q.symbol),
            "longName" => SortKey::text(&q.long_name),
            "sector" => SortKey::text(&q.sector),
            "currentPrice" => SortKey::number(q.current_price),
            "previousClose" => SortKey::number(q.previous_close),
            "marketCap" => SortKey::number(q.market_cap),
            "volume" => SortKey::number(q.volume),
            "sharesOutstanding" => SortKey::number(q.shares_outstanding),
            "dayHigh" => SortKey::number(q.day_high),
            "dayLow" => SortKey::number(q.day_low),
            "trailingPE" => SortKey::number(q.trailing_pe),
            "dividendYield" => SortKey::number(q.dividend_yield),
            "Number" => SortKey::Number(self.entry.number as f64),
            "Weight" => SortKey::Number(self.entry.weight),
            "dailyChangePercent" => SortKey::number(self.daily_change_percent),
            "dailyChangeColor" => SortKey::Text(self.daily_change_color.clone()),
            _ => SortKey::Number(0.0),
        }
    }

    pub fn into_view(self) -> StockQuoteView {
        let q = self.quote;
        StockQuoteView {
            symbol: q.symbol.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            long_name: q.long_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            current_price: q.current_price,
            previous_close: q.previous_close,
            market_cap: format_magnitude(q.market_cap),
            volume: format_magnitude(q.volume),
            shares_outstanding: format_magnitude(q.shares_outstanding),
            day_high: q.day_high,
            day_low: q.day_low,
            trailing_pe: q.trailing_pe,
            dividend_yield: q.dividend_yield,
            sector: q.sector.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            number: self.entry.number,
            weight: self.entry.weight,
            daily_change_percent: self.daily_change_percent,
            daily_change_color: self.daily_change_color,
        }
    }
}

/// Fetch a quote for every entry with at most `concurrency` requests in
/// flight. Outcomes come back in watchlist order.
pub async fn fetch_quotes(
    client: &dyn MarketDataClient,
    watchlist: &[WatchlistEntry],
    concurrency: usize,
) -> Vec<FetchOutcome> {
    stream::iter(watchlist.iter().cloned())
        .map(|entry| async move {
            let result = client.get_quote(&entry.ticker).await;
            FetchOutcome { entry, result }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Drop failed fetches (logging each) and derive the rest.
pub fn successful_rows(outcomes: Vec<FetchOutcome>) -> Vec<StockRow> {
    outcomes
        .into_iter()
        .filter_map(|FetchOutcome { entry, result }| match result {
            Ok(quote) => Some(StockRow::new(entry, quote)),
            Err(e) => {
                warn!("Error fetching data for {}: {}", entry.ticker, e);
                None
            }
        })
        .collect()
}

/// Stable sort by `column`. Equal keys keep their relative order for both
/// directions.
pub fn sort_rows(rows: &mut [StockRow], column: &str, order: SortOrder) {
    if column.is_empty() {
        return;
    }
    match order {
        SortOrder::Asc => rows.sort_by(|a, b| a.sort_key(column).compare(&b.sort_key(column))),
        SortOrder::Desc => rows.sort_by(|a, b| b.sort_key(column).compare(&a.sort_key(column))),
        SortOrder::None => {}
    }
}

/// Build the full board: fetch, derive, sort, then format.
pub async fn build_board(
    client: &dyn MarketDataClient,
    watchlist: &[WatchlistEntry],
    concurrency: usize,
    sort_column: &str,
    sort_order: SortOrder,
) -> Vec<StockQuoteView> {
    let outcomes = fetch_quotes(client, watchlist, concurrency).await;
    let mut rows = successful_rows(outcomes);
    debug!(
        "Fetched {}/{} quotes from {}",
        rows.len(),
        watchlist.len(),
        client.name()
    );

    sort_rows(&mut rows, sort_column, sort_order);

    rows.into_iter().map(StockRow::into_view).collect()
}
