// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// Step 1 — per-step price deltas from consecutive closes.
// Step 2 — split into a gain series (delta where positive, else 0) and a
//          loss series (negated delta where negative, else 0).
// Step 3 — `period`-length rolling simple means of each.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Plain rolling means, not Wilder smoothing: each value depends on exactly
// the last `period` deltas.
//
// Edge cases on the division:
//   - avg_loss == 0, avg_gain > 0  => RSI is exactly 100 (no losses in the
//     window reads as maximally overbought, not an error);
//   - avg_loss == 0, avg_gain == 0 => RSI is 50 (a flat window is neutral).

/// RSI over `closes`, aligned with the input. Cells before the rolling
/// window has filled (the first `period` rows) are `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return result;
    }

    // deltas[i] pairs with closes[i]; index 0 has no predecessor.
    let mut gains = vec![0.0; closes.len()];
    let mut losses = vec![0.0; closes.len()];
    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    // The window needs `period` deltas, the earliest of which is at index 1,
    // so the first defined cell is at index `period`.
    let period_f = period as f64;
    for i in period..closes.len() {
        let window = (i + 1 - period)..=i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period_f;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period_f;

        let value = if avg_loss == 0.0 && avg_gain == 0.0 {
            50.0
        } else if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
        result[i] = Some(value);
    }
    result
}
