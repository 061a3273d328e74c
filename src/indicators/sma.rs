// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the most recent `period` closing prices. The dashboard
// quotes SMA-20 and SMA-50 on every symbol card.

/// Compute the SMA of the last `period` closes.
///
/// Returns `None` when:
/// - `period == 0`
/// - fewer than `period` data points
/// - the mean comes out non-finite (NaN in the input window)
pub fn calculate_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;

    if mean.is_finite() {
        Some(mean)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 20).is_none());
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 4).is_none());
    }

    #[test]
    fn sma_exact_window() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3).unwrap();
        assert!((sma - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_uses_trailing_window_only() {
        // Leading values must not influence the result.
        let closes = [1000.0, 1000.0, 2.0, 4.0, 6.0];
        let sma = calculate_sma(&closes, 3).unwrap();
        assert!((sma - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_nan_in_window_rejected() {
        assert!(calculate_sma(&[1.0, f64::NAN, 3.0], 3).is_none());
    }

    #[test]
    fn sma_nan_outside_window_ignored() {
        let closes = [f64::NAN, 2.0, 4.0, 6.0];
        let sma = calculate_sma(&closes, 3).unwrap();
        assert!((sma - 4.0).abs() < 1e-12);
    }
}
