// =============================================================================
// Secondary Remote Client — end-of-day CSV fallback, single shot
// =============================================================================
//
// Last resort before giving up: a minimal end-of-day provider serving daily
// candles as delimited text. One attempt only — no retries and no backoff,
// because this source is already the degraded fallback and has no rate-limit
// budget to spend on hammering it.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::SecondaryConfig;
use crate::ohlc::{parse_ohlc_table, OhlcSeries};
use crate::types::Provenance;

use super::QuoteSource;

pub struct SecondaryClient {
    config: SecondaryConfig,
    http: reqwest::Client,
}

/// Normalize a ticker for the end-of-day provider: lower-case with the `.us`
/// market suffix appended when absent (`BRK.B` -> `brk.b.us`).
pub fn normalize_symbol(ticker: &str) -> String {
    let symbol = ticker.trim().to_lowercase();
    if symbol.ends_with(".us") {
        symbol
    } else {
        format!("{symbol}.us")
    }
}

impl SecondaryClient {
    pub fn new(config: SecondaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn fetch_csv(&self, symbol: &str) -> anyhow::Result<OhlcSeries> {
        let url = format!("{}/q/d/l/", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("s", symbol), ("i", "d")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("end-of-day provider returned {status}");
        }

        let body = response.text().await?;
        parse_ohlc_table(body.as_bytes())
    }
}

#[async_trait]
impl QuoteSource for SecondaryClient {
    fn provenance(&self) -> Provenance {
        Provenance::SecondaryRemote
    }

    async fn fetch(&self, ticker: &str) -> Option<OhlcSeries> {
        let symbol = normalize_symbol(ticker);
        match self.fetch_csv(&symbol).await {
            Ok(series) => {
                info!(symbol, rows = series.len(), "secondary fetch succeeded");
                Some(series)
            }
            Err(e) => {
                // Single shot by design: log and hand back to the chain.
                warn!(symbol, error = %e, "secondary fetch failed");
                debug!(ticker, "secondary source exhausted");
                None
            }
        }
    }
}
