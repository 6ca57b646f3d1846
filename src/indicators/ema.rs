// =============================================================================
// Exponential Moving Average (EMA) — span convention, seeded from first value
// =============================================================================
//
// Smoothing factor follows the standard span convention:
//   alpha = 2 / (span + 1)
//   EMA_0 = value_0
//   EMA_t = value_t * alpha + EMA_{t-1} * (1 - alpha)
//
// No bias correction: the series is seeded directly from the first value, so
// every input row has a defined EMA.

/// EMA of `values` with smoothing derived from `span`.
///
/// Returns an empty vec for empty input or `span == 0`.
pub fn ema_span(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        prev = value * alpha + prev * (1.0 - alpha);
        result.push(prev);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(ema_span(&[], 5).is_empty());
    }

    #[test]
    fn zero_span() {
        assert!(ema_span(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn seeded_from_first_value() {
        let ema = ema_span(&[10.0, 10.0, 10.0], 4);
        assert_eq!(ema, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn known_values_span_3() {
        // alpha = 2/4 = 0.5
        let ema = ema_span(&[2.0, 4.0, 8.0], 3);
        assert_eq!(ema.len(), 3);
        assert!((ema[0] - 2.0).abs() < 1e-12);
        assert!((ema[1] - 3.0).abs() < 1e-12);
        assert!((ema[2] - 5.5).abs() < 1e-12);
    }

    #[test]
    fn output_aligned_with_input() {
        let values: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        assert_eq!(ema_span(&values, 6).len(), values.len());
    }
}
