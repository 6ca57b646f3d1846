// =============================================================================
// Primary Remote Client — intraday-capable chart API with retry/backoff
// =============================================================================
//
// The richest remote source. Two passes, each with its own retry budget:
//   pass 1: ~1 month of hourly candles,
//   pass 2 (only if pass 1 exhausts): ~6 months of daily candles.
// Failed attempts back off linearly: sleep = backoff_base * attempt_number.
// Every payload must pass the same OHLC usability validation as the local
// store before being accepted.
//
// No explicit request timeout is configured — a hung call stalls the run
// until the transport gives up. Known limitation of this one-shot tool.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::PrimaryConfig;
use crate::ohlc::{Candle, OhlcSeries};
use crate::types::Provenance;

use super::QuoteSource;

pub struct PrimaryClient {
    config: PrimaryConfig,
    http: reqwest::Client,
}

/// Normalize a ticker for the chart API: `BRK.B` -> `BRK-B`.
pub fn normalize_symbol(ticker: &str) -> String {
    ticker.trim().replace('.', "-").to_uppercase()
}

// ---------------------------------------------------------------------------
// Chart-API payload shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

/// The four OHLC arrays. The API emits `null` for halted periods, and a
/// malformed payload may omit a column entirely — both must fail usability
/// validation, so each column is `Option<Vec<...>>` with per-cell options.
#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

impl PrimaryClient {
    pub fn new(config: PrimaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// One HTTP round-trip. Any error string here is a transient failure to
    /// be retried by the caller.
    async fn fetch_once(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> anyhow::Result<OhlcSeries> {
        let url = format!("{}/v8/finance/chart/{symbol}", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("range", range),
                ("interval", interval),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("chart API returned {status}");
        }

        let payload: ChartResponse = response.json().await?;
        candles_from_chart(payload)
    }

    /// Run one granularity pass with up to `retry_attempts` attempts,
    /// sleeping `backoff_base * attempt` between attempts.
    async fn fetch_with_retries(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Option<OhlcSeries> {
        for attempt in 1..=self.config.retry_attempts {
            match self.fetch_once(symbol, range, interval).await {
                Ok(series) => {
                    info!(symbol, range, interval, rows = series.len(), "primary fetch succeeded");
                    return Some(series);
                }
                Err(e) => {
                    warn!(symbol, range, interval, attempt, error = %e, "primary fetch failed");
                }
            }
            if attempt < self.config.retry_attempts {
                tokio::time::sleep(self.config.backoff_base * attempt).await;
            }
        }
        None
    }
}

#[async_trait]
impl QuoteSource for PrimaryClient {
    fn provenance(&self) -> Provenance {
        Provenance::PrimaryRemote
    }

    async fn fetch(&self, ticker: &str) -> Option<OhlcSeries> {
        if !self.config.enabled {
            debug!(ticker, "primary client disabled — skipping without network calls");
            return None;
        }

        let symbol = normalize_symbol(ticker);

        let (range, interval) = self.config.intraday;
        if let Some(series) = self.fetch_with_retries(&symbol, range, interval).await {
            return Some(series);
        }

        // Intraday exhausted — degrade to daily granularity.
        let (range, interval) = self.config.daily;
        self.fetch_with_retries(&symbol, range, interval).await
    }
}

/// Convert a chart payload into a validated series. Rows with a null or
/// non-finite cell in any OHLC column are dropped.
fn candles_from_chart(payload: ChartResponse) -> anyhow::Result<OhlcSeries> {
    let result = payload
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| anyhow::anyhow!("chart payload has no result"))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("chart payload has no quote block"))?;

    let (Some(open), Some(high), Some(low), Some(close)) =
        (quote.open, quote.high, quote.low, quote.close)
    else {
        anyhow::bail!("chart payload is missing an OHLC column");
    };

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let cells = [
            open.get(i).copied().flatten(),
            high.get(i).copied().flatten(),
            low.get(i).copied().flatten(),
            close.get(i).copied().flatten(),
        ];
        let [Some(o), Some(h), Some(l), Some(c)] = cells else {
            continue;
        };
        if !(o.is_finite() && h.is_finite() && l.is_finite() && c.is_finite()) {
            continue;
        }
        let Some(timestamp) = utc_from_unix(ts) else {
            continue;
        };
        candles.push(Candle {
            timestamp,
            open: o,
            high: h,
            low: l,
            close: c,
        });
    }

    OhlcSeries::from_candles(candles).ok_or_else(|| anyhow::anyhow!("chart payload was empty"))
}

fn utc_from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String, enabled: bool) -> PrimaryConfig {
        PrimaryConfig {
            enabled,
            base_url,
            backoff_base: Duration::ZERO,
            ..PrimaryConfig::default()
        }
    }

    fn chart_body(closes: &[f64]) -> serde_json::Value {
        let timestamps: Vec<i64> = (0..closes.len() as i64).map(|i| 1_700_000_000 + i * 3600).collect();
        serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": closes,
                            "high": closes,
                            "low": closes,
                            "close": closes,
                        }]
                    }
                }]
            }
        })
    }

    #[test]
    fn symbol_normalization() {
        assert_eq!(normalize_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_symbol(" aapl "), "AAPL");
    }

    #[tokio::test]
    async fn intraday_success_on_first_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1h"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[1.0, 2.0, 3.0])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        let series = client.fetch("AAPL").await.unwrap();
        assert_eq!(series.len(), 3);
    }

    #[tokio::test]
    async fn normalized_symbol_used_in_request_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/BRK-B"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[1.0, 2.0])))
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        assert!(client.fetch("BRK.B").await.is_some());
    }

    #[tokio::test]
    async fn three_intraday_then_three_daily_attempts_on_total_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1h"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        assert!(client.fetch("AAPL").await.is_none());
    }

    #[tokio::test]
    async fn daily_fallback_after_empty_intraday() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1h"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"chart": {"result": []}})),
            )
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1d"))
            .and(query_param("range", "6mo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[5.0, 6.0])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        let series = client.fetch("AAPL").await.unwrap();
        assert_eq!(series.len(), 2);
    }

    #[tokio::test]
    async fn missing_close_column_rejected() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": [1_700_000_000i64],
                    "indicators": {
                        "quote": [{"open": [1.0], "high": [1.0], "low": [1.0]}]
                    }
                }]
            }
        });
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(6)
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        assert!(client.fetch("AAPL").await.is_none());
    }

    #[tokio::test]
    async fn disabled_client_makes_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[1.0])))
            .expect(0)
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), false));
        assert!(client.fetch("AAPL").await.is_none());
    }

    #[tokio::test]
    async fn null_cells_dropped_from_rows() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": [1_700_000_000i64, 1_700_003_600i64],
                    "indicators": {
                        "quote": [{
                            "open": [1.0, null],
                            "high": [1.0, 2.0],
                            "low": [1.0, 2.0],
                            "close": [1.0, 2.0],
                        }]
                    }
                }]
            }
        });
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = PrimaryClient::new(test_config(server.uri(), true));
        let series = client.fetch("AAPL").await.unwrap();
        assert_eq!(series.len(), 1);
    }
}
