// =============================================================================
// OHLC series — candle model, usability validation, and table parsing
// =============================================================================
//
// Every data source funnels through `OhlcSeries::from_candles`, so the
// usability rules live in exactly one place:
//   - the source table must carry all four of Open/High/Low/Close
//     (case-sensitive) — a table missing any of them is rejected no matter
//     how many rows it has;
//   - rows whose OHLC cells fail to parse as finite numbers are dropped;
//   - at least one valid row must survive;
//   - candles are sorted ascending by timestamp.
// =============================================================================

use std::io::Read;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Required columns for a table to count as usable OHLC data.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Open", "High", "Low", "Close"];

/// A single OHLC candle. All prices are finite by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// An ordered-by-time, non-empty OHLC series.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcSeries {
    candles: Vec<Candle>,
}

impl OhlcSeries {
    /// Sort ascending by timestamp and validate non-emptiness.
    ///
    /// Returns `None` for an empty row set — the caller treats that the same
    /// as a missing-column table: not usable, try the next candidate.
    pub fn from_candles(mut candles: Vec<Candle>) -> Option<Self> {
        if candles.is_empty() {
            return None;
        }
        candles.sort_by_key(|c| c.timestamp);
        Some(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Most recent candle (the series is never empty).
    pub fn latest(&self) -> &Candle {
        &self.candles[self.candles.len() - 1]
    }

    /// Close column in time order, ready for the indicator engine.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

// ---------------------------------------------------------------------------
// Delimited-table parsing (local store files and the end-of-day remote)
// ---------------------------------------------------------------------------

/// Parse a delimited OHLC table into a validated series.
///
/// The time axis comes from a `Date` column when one exists, otherwise from
/// the first column. Rows with unparseable timestamps or non-finite prices
/// are skipped with a debug log rather than failing the whole table.
pub fn parse_ohlc_table<R: Read>(reader: R) -> Result<OhlcSeries> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .context("failed to read table header row")?
        .clone();

    let column_index = |name: &str| headers.iter().position(|h| h == name);

    let mut price_columns = [0usize; 4];
    for (slot, name) in price_columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column_index(name)
            .with_context(|| format!("table is missing required column '{name}'"))?;
    }
    let [open_idx, high_idx, low_idx, close_idx] = price_columns;

    // Prefer an explicit Date column; fall back to the first column.
    let time_idx = column_index("Date").unwrap_or(0);

    let mut candles = Vec::new();
    for (row_number, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!(row = row_number, error = %e, "skipping malformed row");
                continue;
            }
        };

        let timestamp = match record.get(time_idx).and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                debug!(row = row_number, "skipping row with unparseable timestamp");
                continue;
            }
        };

        let mut prices = [0.0f64; 4];
        let mut valid = true;
        for (slot, idx) in prices.iter_mut().zip([open_idx, high_idx, low_idx, close_idx]) {
            match record.get(idx).and_then(|s| s.trim().parse::<f64>().ok()) {
                Some(v) if v.is_finite() => *slot = v,
                _ => {
                    valid = false;
                    break;
                }
            }
        }
        if !valid {
            debug!(row = row_number, "skipping row with missing or non-finite prices");
            continue;
        }

        let [open, high, low, close] = prices;
        candles.push(Candle {
            timestamp,
            open,
            high,
            low,
            close,
        });
    }

    OhlcSeries::from_candles(candles).context("table contained no usable rows")
}

/// Parse a timestamp cell: RFC 3339, then `YYYY-MM-DD HH:MM:SS`, then a
/// bare `YYYY-MM-DD` date (interpreted as midnight UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
