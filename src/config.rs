// =============================================================================
// Scan Configuration — retry policy, endpoints, and local store location
// =============================================================================
//
// There is no config file: every run starts from `ScanConfig::default()`,
// with a single environment override (`VANTAGE_STORE_DIR`) for the local
// candle store directory.  Endpoint base URLs and the backoff base are plain
// fields so tests can point the clients at a mock server with zero backoff.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Ticker scanned when none is given on the command line.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Environment variable that overrides the local candle store directory.
pub const STORE_DIR_ENV: &str = "VANTAGE_STORE_DIR";

/// Settings for the primary (intraday-capable) remote client.
#[derive(Debug, Clone)]
pub struct PrimaryConfig {
    /// When false the client short-circuits to "not found" with zero
    /// network calls (backing service unavailable / explicitly disabled).
    pub enabled: bool,
    pub base_url: String,
    /// Intraday pass: (range, interval).
    pub intraday: (&'static str, &'static str),
    /// Daily fallback pass: (range, interval).
    pub daily: (&'static str, &'static str),
    /// Attempts per pass (intraday and daily each get this many).
    pub retry_attempts: u32,
    /// Backoff sleep is `backoff_base * attempt_number`, linearly increasing.
    pub backoff_base: Duration,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            intraday: ("1mo", "1h"),
            daily: ("6mo", "1d"),
            retry_attempts: 3,
            backoff_base: Duration::from_millis(1200),
        }
    }
}

/// Settings for the secondary (end-of-day) remote client.
///
/// Deliberately minimal: this source is an already-degraded fallback with no
/// rate-limit budget to spend on retries, so there is no retry policy here.
#[derive(Debug, Clone)]
pub struct SecondaryConfig {
    pub base_url: String,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stooq.com".to_string(),
        }
    }
}

/// Top-level configuration for one scanner invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory searched for locally cached OHLC tables.
    pub store_dir: PathBuf,
    pub primary: PrimaryConfig,
    pub secondary: SecondaryConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            primary: PrimaryConfig::default(),
            secondary: SecondaryConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Build the runtime configuration, applying environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.store_dir = PathBuf::from(dir);
            }
        }
        config
    }
}

/// `$HOME/Downloads`, falling back to the current directory when `$HOME`
/// is unset (e.g. stripped-down containers).
fn default_store_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join("Downloads"),
        _ => PathBuf::from("."),
    }
}
