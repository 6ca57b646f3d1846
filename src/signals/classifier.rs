// =============================================================================
// Signal Classifier — threshold rules over the latest indicator row
// =============================================================================
//
// Two mutually exclusive rule sets, evaluated on the most recent row only:
//   BUY  iff SMA-fast > SMA-slow  AND  RSI < 70  AND  MACD > signal
//   SELL iff SMA-fast < SMA-slow  AND  RSI > 30  AND  MACD < signal
//   otherwise HOLD.
// Equality is neither ">" nor "<", so ties always fall through to HOLD.
//
// NO DATA comes in two flavors, distinguished by the evidence reason:
//   "insufficient candles" — fewer than MIN_CANDLES rows; the indicator
//   engine is not invoked at all in this case.
//   "indicators NaN"       — enough rows, but some latest-row cell is
//   still undefined.

use crate::indicators::compute_indicators;
use crate::ohlc::OhlcSeries;
use crate::types::{Evidence, Verdict};

/// Minimum rows required before the classifier will look at indicators.
pub const MIN_CANDLES: usize = 15;

/// RSI ceiling for a BUY (at or above reads as overbought).
const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI floor for a SELL (at or below reads as oversold).
const RSI_OVERSOLD: f64 = 30.0;

/// Classify a validated OHLC series into a verdict plus evidence.
pub fn classify(series: &OhlcSeries) -> (Verdict, Evidence) {
    if series.len() < MIN_CANDLES {
        return (
            Verdict::NoData,
            Evidence::Unavailable {
                reason: "insufficient candles".to_string(),
            },
        );
    }

    let latest = compute_indicators(series).latest();
    let (Some(sma_fast), Some(sma_slow), Some(rsi), Some(macd), Some(macd_signal)) = (
        latest.sma_fast,
        latest.sma_slow,
        latest.rsi,
        latest.macd,
        latest.macd_signal,
    ) else {
        return (
            Verdict::NoData,
            Evidence::Unavailable {
                reason: "indicators NaN".to_string(),
            },
        );
    };

    let fast_over_slow = sma_fast > sma_slow;
    let macd_over_signal = macd > macd_signal;

    let evidence = Evidence::Metrics {
        price: round_to(latest.close, 4),
        fast_over_slow,
        rsi: round_to(rsi, 2),
        macd_over_signal,
    };

    let verdict = if fast_over_slow && rsi < RSI_OVERBOUGHT && macd_over_signal {
        Verdict::Buy
    } else if sma_fast < sma_slow && rsi > RSI_OVERSOLD && macd < macd_signal {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    (verdict, evidence)
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
