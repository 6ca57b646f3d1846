// =============================================================================
// Shared types used across the Vantage ticker scanner
// =============================================================================

use serde::{Deserialize, Serialize};

/// Discrete trading verdict emitted once per run. No other states exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Buy,
    Sell,
    Hold,
    NoData,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
            Self::NoData => write!(f, "NO DATA"),
        }
    }
}

/// Which backing source supplied the candles that produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    LocalStore,
    PrimaryRemote,
    SecondaryRemote,
    None,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalStore => write!(f, "local_store"),
            Self::PrimaryRemote => write!(f, "primary_remote"),
            Self::SecondaryRemote => write!(f, "secondary_remote"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Supporting evidence attached to a verdict.
///
/// `Metrics` is produced for every BUY/SELL/HOLD; `Unavailable` carries the
/// reason string for a NO DATA verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    Metrics {
        /// Latest close, rounded to 4 decimal places.
        price: f64,
        /// SMA-fast strictly above SMA-slow on the latest row.
        fast_over_slow: bool,
        /// RSI(7), rounded to 2 decimal places.
        rsi: f64,
        /// MACD strictly above its signal line on the latest row.
        macd_over_signal: bool,
    },
    Unavailable {
        reason: String,
    },
}
