//! In-memory market data client for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ProviderError, ProviderResult};

use super::traits::MarketDataClient;
use super::types::{Quote, RawBar};

#[derive(Default)]
pub struct MockMarket {
    pub quotes: HashMap<String, Quote>,
    pub history: HashMap<String, Vec<RawBar>>,
    /// Every (symbol, period) passed to `get_history`
    pub history_calls: Mutex<Vec<(String, String)>>,
}

impl MockMarket {
    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    pub fn with_history(mut self, symbol: &str, bars: Vec<RawBar>) -> Self {
        self.history.insert(symbol.to_string(), bars);
        self
    }
}

#[async_trait]
impl MarketDataClient for MockMarket {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_quote(&self, symbol: &str) -> ProviderResult<Quote> {
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    async fn get_history(&self, symbol: &str, period: &str) -> ProviderResult<Vec<RawBar>> {
        self.history_calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), period.to_string()));

        self.history.get(symbol).cloned().ok_or_else(|| ProviderError::Http {
            status: 404,
            body: format!("no data for {}", symbol),
        })
    }
}
