// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the trailing window (sum of squared deviations divided by n, not n-1).

use crate::indicators::sma::calculate_sma;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the last `period` closes.
///
/// The middle band is exactly `calculate_sma(closes, period)` — the dashboard
/// displays both and they must agree to the last bit.
///
/// Returns `None` when:
/// - `period == 0` or fewer than `period` data points
/// - any band comes out non-finite (NaN in the window)
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerBands> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let middle = calculate_sma(closes, period)?;

    let window = &closes[closes.len() - period..];
    let variance =
        window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    if upper.is_finite() && lower.is_finite() {
        Some(BollingerBands { upper, middle, lower })
    } else {
        None
    }
}
