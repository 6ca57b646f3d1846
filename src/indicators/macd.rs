// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD   = EMA(close, fast_span) - EMA(close, slow_span)
//   Signal = EMA(MACD, signal_span)
//
// Both lines use the span->alpha EMA from `ema.rs` (seeded from the first
// value), so they are defined for every input row.

use super::ema::ema_span;

/// MACD line and its signal line, both aligned with `closes`.
pub fn macd_lines(
    closes: &[f64],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> (Vec<f64>, Vec<f64>) {
    if closes.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let ema_fast = ema_span(closes, fast_span);
    let ema_slow = ema_span(closes, slow_span);
    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ema_span(&macd, signal_span);
    (macd, signal)
}
