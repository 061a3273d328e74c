// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators shown on the
// dashboard. Every public function returns `Option<T>` so callers are forced
// to handle insufficient-data and numerical-edge-case scenarios.

pub mod bollinger;
pub mod rsi;
pub mod sma;

use serde::Serialize;

use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;

/// Minimum series length for a full snapshot: SMA-50 needs 50 closes.
pub const MIN_SNAPSHOT_LEN: usize = 50;

const RSI_PERIOD: usize = 14;
const SMA_SHORT_PERIOD: usize = 20;
const SMA_LONG_PERIOD: usize = 50;
const BOLLINGER_PERIOD: usize = 20;
const BOLLINGER_NUM_STD: f64 = 2.0;

/// The indicator set displayed for one symbol: RSI(14), SMA(20), SMA(50) and
/// Bollinger Bands(20, 2σ).
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalSnapshot {
    pub rsi: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub bollinger_upper: f64,
    pub bollinger_middle: f64,
    pub bollinger_lower: f64,
}

/// Compute the full indicator snapshot over a chronologically ascending
/// series of closing prices.
///
/// Each indicator reads only the trailing window it needs (14, 20 or 50
/// closes); they are independent of each other.
///
/// Returns `None` when the series is shorter than [`MIN_SNAPSHOT_LEN`] points
/// or any individual indicator rejects its window (non-finite closes). A
/// returned snapshot never contains NaN or infinity.
pub fn compute_snapshot(closes: &[f64]) -> Option<TechnicalSnapshot> {
    if closes.len() < MIN_SNAPSHOT_LEN {
        return None;
    }

    let rsi = calculate_rsi(closes, RSI_PERIOD)?;
    let sma20 = calculate_sma(closes, SMA_SHORT_PERIOD)?;
    let sma50 = calculate_sma(closes, SMA_LONG_PERIOD)?;
    let bands = calculate_bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_NUM_STD)?;

    Some(TechnicalSnapshot {
        rsi,
        sma20,
        sma50,
        bollinger_upper: bands.upper,
        bollinger_middle: bands.middle,
        bollinger_lower: bands.lower,
    })
}
