// =============================================================================
// Local Candle Store — previously saved OHLC tables on disk
// =============================================================================
//
// Cheapest source in the chain: no network at all. The ticker is matched
// against a fixed list of filename variants inside the configured directory;
// the first candidate that exists, parses, and passes OHLC validation wins.
// Parse failures are swallowed per candidate — a corrupt file just means we
// try the next spelling, and ultimately the next source.

use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::ohlc::{parse_ohlc_table, OhlcSeries};
use crate::types::Provenance;

use super::QuoteSource;

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Filename variants tried in order: exact, upper, lower, and with any
    /// `.` replaced by `-` (e.g. `BRK.B.csv` alongside `BRK-B.csv`).
    fn candidate_paths(&self, ticker: &str) -> Vec<PathBuf> {
        let ticker = ticker.trim();
        [
            format!("{ticker}.csv"),
            format!("{}.csv", ticker.to_uppercase()),
            format!("{}.csv", ticker.to_lowercase()),
            format!("{}.csv", ticker.replace('.', "-")),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .collect()
    }

    fn try_load(path: &Path) -> Option<OhlcSeries> {
        let file = File::open(path).ok()?;
        match parse_ohlc_table(file) {
            Ok(series) => Some(series),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "candidate file not usable");
                None
            }
        }
    }
}

#[async_trait]
impl QuoteSource for LocalStore {
    fn provenance(&self) -> Provenance {
        Provenance::LocalStore
    }

    async fn fetch(&self, ticker: &str) -> Option<OhlcSeries> {
        for path in self.candidate_paths(ticker) {
            if !path.exists() {
                continue;
            }
            if let Some(series) = Self::try_load(&path) {
                info!(path = %path.display(), rows = series.len(), "loaded candles from local store");
                return Some(series);
            }
        }
        debug!(ticker, dir = %self.dir.display(), "no usable local file");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    /// Fresh per-test directory under the system temp dir.
    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vantage-store-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    const VALID_TABLE: &str = "Date,Open,High,Low,Close\n\
                               2024-01-02,1.0,1.1,0.9,1.0\n\
                               2024-01-03,1.0,1.2,0.9,1.1\n";

    #[tokio::test]
    async fn exact_name_match() {
        let dir = scratch_dir();
        write_file(&dir, "AAPL.csv", VALID_TABLE);
        let store = LocalStore::new(&dir);
        assert!(store.fetch("AAPL").await.is_some());
    }

    #[tokio::test]
    async fn lowercase_variant_match() {
        let dir = scratch_dir();
        write_file(&dir, "aapl.csv", VALID_TABLE);
        let store = LocalStore::new(&dir);
        assert!(store.fetch("AAPL").await.is_some());
    }

    #[tokio::test]
    async fn dash_variant_match() {
        let dir = scratch_dir();
        write_file(&dir, "BRK-B.csv", VALID_TABLE);
        let store = LocalStore::new(&dir);
        assert!(store.fetch("BRK.B").await.is_some());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let store = LocalStore::new(scratch_dir());
        assert!(store.fetch("MSFT").await.is_none());
    }

    #[tokio::test]
    async fn corrupt_candidate_skipped_then_next_variant_wins() {
        let dir = scratch_dir();
        // Exact-case candidate lacks the Close column; the lowercase variant
        // is valid and should be picked up instead.
        write_file(&dir, "TSLA.csv", "Date,Open,High,Low\n2024-01-02,1,1,1\n");
        write_file(&dir, "tsla.csv", VALID_TABLE);
        let store = LocalStore::new(&dir);
        assert!(store.fetch("TSLA").await.is_some());
    }

    #[tokio::test]
    async fn table_missing_ohlc_column_rejected() {
        let dir = scratch_dir();
        write_file(&dir, "IBM.csv", "Date,Open,High,Low\n2024-01-02,1,1,1\n");
        let store = LocalStore::new(&dir);
        assert!(store.fetch("IBM").await.is_none());
    }
}
