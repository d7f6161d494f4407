//! Daily chart provider for the v8 finance chart API.
//!
//! Each instrument carries several upstream identifiers (spot pair, future,
//! plain name). They are tried in order; each attempt is bounded by its own
//! timeout and transient failures are retried with exponential backoff before
//! moving on to the next identifier.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::models::bar::{Bar, RawSeries};
use crate::models::instrument::Instrument;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl QuoteData {
    /// One bar per trading day. A column that ends early leaves gaps.
    fn bars(&self) -> Vec<Bar> {
        let days = self.high.len().max(self.close.len());
        (0..days)
            .map(|i| {
                Bar::new(
                    self.high.get(i).copied().flatten(),
                    self.close.get(i).copied().flatten(),
                )
            })
            .collect()
    }
}

pub struct ChartApiProvider {
    client: reqwest::Client,
    config: FetchConfig,
}

impl ChartApiProvider {
    pub fn new(config: FetchConfig) -> Result<Self, MarketDataError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://finance.yahoo.com/"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| MarketDataError::ClientSetup(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    fn chart_url(&self, ticker: &str, range: &str) -> Result<Url, MarketDataError> {
        let malformed = |reason: String| MarketDataError::Malformed {
            ticker: ticker.to_string(),
            reason,
        };

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| malformed(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| malformed("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(&["v8", "finance", "chart", ticker]);
        url.query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", range);

        Ok(url)
    }

    /// One bounded request for one identifier.
    async fn fetch_once(&self, ticker: &str, range: &str) -> Result<RawSeries, MarketDataError> {
        let url = self.chart_url(ticker, range)?;
        debug!(ticker = %ticker, url = %url, "requesting daily chart");

        let attempt = async {
            let response = self.client.get(url).send().await.map_err(|e| {
                MarketDataError::Transport {
                    ticker: ticker.to_string(),
                    reason: e.to_string(),
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(MarketDataError::Http {
                    ticker: ticker.to_string(),
                    status: status.as_u16(),
                });
            }

            let body: ChartResponse =
                response
                    .json()
                    .await
                    .map_err(|e| MarketDataError::Malformed {
                        ticker: ticker.to_string(),
                        reason: e.to_string(),
                    })?;

            parse_chart(ticker, body)
        };

        match tokio::time::timeout(self.config.attempt_timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                ticker: ticker.to_string(),
                timeout_ms: self.config.attempt_timeout.as_millis() as u64,
            }),
        }
    }

    /// Fetch one identifier, retrying transient failures.
    async fn fetch_ticker(&self, ticker: &str, range: &str) -> Result<RawSeries, MarketDataError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.config.retry_min_delay)
            .with_max_times(self.config.retries);

        (|| self.fetch_once(ticker, range))
            .retry(backoff)
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay| {
                warn!(ticker = %ticker, error = %err, delay_ms = delay.as_millis() as u64, "retrying chart request");
            })
            .await
    }
}

#[async_trait]
impl MarketDataProvider for ChartApiProvider {
    async fn fetch_series(&self, instrument: &Instrument) -> Result<RawSeries, MarketDataError> {
        let range = instrument.class.history_range();
        let mut attempts = Vec::with_capacity(instrument.candidates.len());

        for ticker in &instrument.candidates {
            match self.fetch_ticker(ticker, range).await {
                Ok(series) => {
                    info!(
                        symbol = %instrument.symbol,
                        ticker = %ticker,
                        bars = series.closes.len(),
                        "fetched daily series"
                    );
                    return Ok(series);
                }
                Err(e) => {
                    warn!(symbol = %instrument.symbol, ticker = %ticker, error = %e, "identifier failed, trying next");
                    attempts.push(e.to_string());
                }
            }
        }

        Err(MarketDataError::AllCandidatesFailed {
            symbol: instrument.symbol.clone(),
            attempts,
        })
    }
}

fn parse_chart(ticker: &str, response: ChartResponse) -> Result<RawSeries, MarketDataError> {
    let malformed = |reason: String| MarketDataError::Malformed {
        ticker: ticker.to_string(),
        reason,
    };

    let data = match response.chart.result {
        Some(results) => results
            .into_iter()
            .next()
            .ok_or_else(|| malformed("result array is empty".to_string()))?,
        None => {
            return Err(match response.chart.error {
                Some(err) => malformed(format!(
                    "{}: {}",
                    err.code,
                    err.description.unwrap_or_default()
                )),
                None => malformed("empty result with no error".to_string()),
            })
        }
    };

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| malformed("no quote data".to_string()))?;

    let latest_close = quote
        .close
        .iter()
        .rev()
        .find_map(|c| c.filter(|v| v.is_finite()));

    let current_price = data
        .meta
        .regular_market_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .or(latest_close)
        .ok_or_else(|| MarketDataError::EmptySeries {
            ticker: ticker.to_string(),
        })?;

    if latest_close.is_none() {
        return Err(MarketDataError::EmptySeries {
            ticker: ticker.to_string(),
        });
    }

    Ok(RawSeries::from_bars(current_price, &quote.bars()))
}
