// =============================================================================
// Simple Moving Average (SMA) — rolling mean with explicit undefined cells
// =============================================================================
//
// The output is aligned with the input: `result[i]` is the mean of the
// `window` values ending at `i`, or `None` while the window has not filled.
// Undefined cells stay `None` — they are never coerced to 0.0, so downstream
// consumers can tell "no value yet" apart from a genuine zero.

/// Rolling mean over `values` with the given `window`.
///
/// `window == 0` yields an all-`None` series (degenerate, but never panics).
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let mut running_sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(running_sum / window as f64);

    for i in window..values.len() {
        running_sum += values[i] - values[i - window];
        result[i] = Some(running_sum / window as f64);
    }
    result
}
