// =============================================================================
// Data Sources Module
// =============================================================================
//
// One capability interface over every way of obtaining candles:
//   - local candle store (previously saved delimited tables),
//   - primary intraday-capable remote (chart-API JSON, retry/backoff),
//   - secondary end-of-day remote (CSV over HTTP, single shot).
//
// "Not found" is a normal outcome, never an error: providers log their
// failures and return `None`, and the chain simply moves on.

pub mod chain;
pub mod local_store;
pub mod primary;
pub mod secondary;

use async_trait::async_trait;

use crate::ohlc::OhlcSeries;
use crate::types::Provenance;

pub use chain::SourceChain;
pub use local_store::LocalStore;
pub use primary::PrimaryClient;
pub use secondary::SecondaryClient;

/// A prioritized candle provider. Each implementation encapsulates its own
/// retry policy; the chain is provider-agnostic and tries each exactly once.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Tag attached to any dataset this source produces.
    fn provenance(&self) -> Provenance;

    /// Fetch a usable OHLC series for `ticker`, or `None` when this source
    /// has nothing. Transient and structural failures are swallowed here.
    async fn fetch(&self, ticker: &str) -> Option<OhlcSeries>;
}
