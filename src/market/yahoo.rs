//! Yahoo Finance market data client.
//!
//! Quotes come from the quoteSummary API, which needs a session cookie plus
//! a matching crumb. History comes from the v8 chart API, which does not.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{header, Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::constants::provider::{HISTORY_INTERVAL, QUOTE_SUMMARY_MODULES};
use crate::error::{ProviderError, ProviderResult};

use super::traits::MarketDataClient;
use super::types::{Quote, RawBar};
use super::yahoo_models::{raw, ChartResponse, QuoteSummaryResponse};

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

pub struct YahooClient {
    client: Client,
    config: ProviderConfig,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooClient {
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Cached crumb, or a fresh one. The write lock is held across the fetch
    /// so concurrent callers share a single cookie/crumb round trip.
    async fn ensure_crumb(&self) -> ProviderResult<CrumbData> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let mut cached = self.crumb.write().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = self.fetch_crumb().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_crumb(&self) -> ProviderResult<CrumbData> {
        // The cookie endpoint answers 404 but still sets the session cookie
        let response = self.client.get(&self.config.cookie_url).send().await?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| ProviderError::AuthFailed {
                reason: "no session cookie returned".to_string(),
            })?;

        let crumb_url = endpoint(&self.config.quote_base_url, &["v1", "test", "getcrumb"])?;
        let response = self
            .client
            .get(crumb_url)
            .header(header::COOKIE, &cookie)
            .send()
            .await?;

        let status = response.status();
        let crumb = response.text().await?;
        if !status.is_success() || crumb.trim().is_empty() {
            return Err(ProviderError::AuthFailed {
                reason: format!("crumb request returned HTTP {}", status.as_u16()),
            });
        }

        debug!("Obtained Yahoo crumb");
        Ok(CrumbData {
            cookie,
            crumb: crumb.trim().to_string(),
        })
    }

    /// Drop the cached crumb if it is still `stale`. A crumb another request
    /// already refreshed is left alone.
    async fn invalidate_crumb(&self, stale: &CrumbData) {
        let mut cached = self.crumb.write().await;
        if cached.as_ref().is_some_and(|c| c.crumb == stale.crumb) {
            *cached = None;
        }
    }

    async fn request_quote_summary(&self, symbol: &str, crumb: &CrumbData) -> ProviderResult<String> {
        let mut url = endpoint(
            &self.config.quote_base_url,
            &["v10", "finance", "quoteSummary", symbol],
        )?;
        url.query_pairs_mut()
            .append_pair("modules", QUOTE_SUMMARY_MODULES)
            .append_pair("crumb", &crumb.crumb);

        let response = self
            .client
            .get(url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await?;

        Self::read_body(response).await
    }

    // ========================================================================
    // Response handling
    // ========================================================================

    /// Read the body of a response, turning non-success statuses into errors.
    /// 404 bodies still carry Yahoo's JSON error envelope, so they are
    /// returned for the caller to inspect.
    pub(crate) async fn read_body(response: reqwest::Response) -> ProviderResult<String> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(body);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthFailed {
                reason: "Yahoo rejected the crumb".to_string(),
            });
        }
        Err(ProviderError::Http {
            status: status.as_u16(),
            body,
        })
    }

    /// Map a quoteSummary payload onto our quote fields.
    pub(crate) fn parse_quote_summary(symbol: &str, resp: QuoteSummaryResponse) -> ProviderResult<Quote> {
        let result = resp
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| match resp.quote_summary.error {
                Some(err) if err.code != "Not Found" => {
                    ProviderError::ResponseFormat(format!("{}: {}", err.code, err.description))
                }
                _ => ProviderError::SymbolNotFound {
                    symbol: symbol.to_string(),
                },
            })?;

        let price = result.price.unwrap_or_default();
        let detail = result.summary_detail.unwrap_or_default();
        let stats = result.default_key_statistics.unwrap_or_default();
        let financial = result.financial_data.unwrap_or_default();
        let profile = result.summary_profile.unwrap_or_default();

        Ok(Quote {
            symbol: price.symbol,
            long_name: price.long_name,
            current_price: raw(&financial.current_price).or_else(|| raw(&price.regular_market_price)),
            previous_close: raw(&detail.previous_close),
            market_cap: raw(&detail.market_cap).or_else(|| raw(&price.market_cap)),
            volume: raw(&price.regular_market_volume),
            shares_outstanding: raw(&stats.shares_outstanding),
            day_high: raw(&detail.day_high),
            day_low: raw(&detail.day_low),
            trailing_pe: raw(&detail.trailing_pe),
            dividend_yield: raw(&detail.dividend_yield),
            sector: profile.sector,
        })
    }

    /// Turn a chart payload into bars in the exchange's offset. Bars are
    /// returned as-is; dropping incomplete rows is the caller's job.
    pub(crate) fn parse_chart(symbol: &str, resp: ChartResponse) -> ProviderResult<Vec<RawBar>> {
        let data = resp
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| match resp.chart.error {
                Some(err) if err.code != "Not Found" => {
                    ProviderError::ResponseFormat(format!("{}: {}", err.code, err.description))
                }
                _ => ProviderError::SymbolNotFound {
                    symbol: symbol.to_string(),
                },
            })?;

        // No timestamps means no trading days in the range
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let offset_secs = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
        let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
            ProviderError::ResponseFormat(format!("invalid gmtoffset: {}", offset_secs))
        })?;

        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                let timestamp = DateTime::from_timestamp(ts, 0)
                    .ok_or_else(|| ProviderError::ResponseFormat(format!("invalid timestamp: {}", ts)))?
                    .with_timezone(&offset);

                Ok(RawBar {
                    timestamp,
                    open: quote.open.get(i).copied().flatten(),
                    high: quote.high.get(i).copied().flatten(),
                    low: quote.low.get(i).copied().flatten(),
                    close: quote.close.get(i).copied().flatten(),
                    volume: quote.volume.get(i).copied().flatten(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataClient for YahooClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn get_quote(&self, symbol: &str) -> ProviderResult<Quote> {
        let crumb = self.ensure_crumb().await?;

        let body = match self.request_quote_summary(symbol, &crumb).await {
            Err(ProviderError::AuthFailed { .. }) => {
                warn!("Yahoo rejected the crumb for {}, refreshing", symbol);
                self.invalidate_crumb(&crumb).await;
                let fresh = self.ensure_crumb().await?;
                self.request_quote_summary(symbol, &fresh).await?
            }
            other => other?,
        };

        let summary: QuoteSummaryResponse = serde_json::from_str(&body)?;
        Self::parse_quote_summary(symbol, summary)
    }

    async fn get_history(&self, symbol: &str, period: &str) -> ProviderResult<Vec<RawBar>> {
        let mut url = endpoint(
            &self.config.chart_base_url,
            &["v8", "finance", "chart", symbol],
        )?;
        url.query_pairs_mut()
            .append_pair("range", period)
            .append_pair("interval", HISTORY_INTERVAL);

        let response = self.client.get(url).send().await?;
        let body = Self::read_body(response).await?;

        let chart: ChartResponse = serde_json::from_str(&body)?;
        Self::parse_chart(symbol, chart)
    }
}

/// Join path segments onto a base URL, percent-encoding each one.
fn endpoint(base: &str, segments: &[&str]) -> ProviderResult<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::ResponseFormat(format!("base URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
