// =============================================================================
// Source Chain Orchestrator — first usable dataset wins
// =============================================================================
//
// Fixed priority: local store, then primary remote, then secondary remote.
// The ordering is a correctness property, not a performance tweak: prefer
// already-local data over any network call, and intraday-capable data over
// the degraded end-of-day fallback. Sources are tried strictly sequentially,
// each exactly once per invocation (their internal retries are private); no
// parallel fan-out.

use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::ohlc::OhlcSeries;
use crate::types::Provenance;

use super::{LocalStore, PrimaryClient, QuoteSource, SecondaryClient};

pub struct SourceChain {
    sources: Vec<Box<dyn QuoteSource>>,
}

impl SourceChain {
    /// The production chain: local store, primary remote, secondary remote.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::with_sources(vec![
            Box::new(LocalStore::new(config.store_dir.clone())),
            Box::new(PrimaryClient::new(config.primary.clone())),
            Box::new(SecondaryClient::new(config.secondary.clone())),
        ])
    }

    /// Chain over an arbitrary ordered set of sources.
    pub fn with_sources(sources: Vec<Box<dyn QuoteSource>>) -> Self {
        Self { sources }
    }

    /// Try each source in priority order; return the first usable dataset
    /// tagged with its provenance, or `Provenance::None` when every source
    /// comes up empty.
    pub async fn acquire(&self, ticker: &str) -> (Option<OhlcSeries>, Provenance) {
        for source in &self.sources {
            let provenance = source.provenance();
            debug!(ticker, source = %provenance, "trying source");
            if let Some(series) = source.fetch(ticker).await {
                info!(ticker, source = %provenance, rows = series.len(), "data acquired");
                return (Some(series), provenance);
            }
        }
        info!(ticker, "all sources exhausted");
        (None, Provenance::None)
    }
}
