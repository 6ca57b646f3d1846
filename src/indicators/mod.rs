// =============================================================================
// Indicator Engine
// =============================================================================
//
// Pure, side-effect-free derivation of the enriched series from a validated
// OHLC series.  Every derived column is computed fresh per invocation from an
// immutable borrow of the input; the source series is never mutated.
// Undefined cells (window not yet filled) are `Option::None` and propagate
// distinctly from zero.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

use crate::ohlc::OhlcSeries;

/// Window for the fast simple moving average.
pub const SMA_FAST_WINDOW: usize = 5;
/// Window for the slow simple moving average.
pub const SMA_SLOW_WINDOW: usize = 10;
/// RSI look-back period.
pub const RSI_PERIOD: usize = 7;
/// MACD fast EMA span.
pub const MACD_FAST_SPAN: usize = 6;
/// MACD slow EMA span.
pub const MACD_SLOW_SPAN: usize = 13;
/// MACD signal-line EMA span.
pub const MACD_SIGNAL_SPAN: usize = 4;

/// OHLC series plus derived indicator columns, all aligned row-for-row
/// with the input closes.
#[derive(Debug, Clone)]
pub struct EnrichedSeries {
    closes: Vec<f64>,
    pub sma_fast: Vec<Option<f64>>,
    pub sma_slow: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
}

/// The most recent row of an enriched series, as inspected by the
/// signal classifier.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRow {
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Latest row (the input series is non-empty by construction).
    pub fn latest(&self) -> IndicatorRow {
        let i = self.closes.len() - 1;
        IndicatorRow {
            close: self.closes[i],
            sma_fast: self.sma_fast[i],
            sma_slow: self.sma_slow[i],
            rsi: self.rsi[i],
            macd: self.macd.get(i).copied(),
            macd_signal: self.macd_signal.get(i).copied(),
        }
    }
}

/// Derive the full indicator set over the Close column.
pub fn compute_indicators(series: &OhlcSeries) -> EnrichedSeries {
    let closes = series.closes();
    let sma_fast = sma::rolling_mean(&closes, SMA_FAST_WINDOW);
    let sma_slow = sma::rolling_mean(&closes, SMA_SLOW_WINDOW);
    let rsi = rsi::rsi(&closes, RSI_PERIOD);
    let (macd, macd_signal) =
        macd::macd_lines(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN);

    EnrichedSeries {
        closes,
        sma_fast,
        sma_slow,
        rsi,
        macd,
        macd_signal,
    }
}
