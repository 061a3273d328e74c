// =============================================================================
// Relative Strength Index (RSI) — Trailing Simple Average
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether a symbol is overbought or oversold.
//
// Step 1 — Compute price deltas from consecutive closes.
// Step 2 — Split into gains (positive deltas) and losses (|negative deltas|).
// Step 3 — Average the last `period` gains and the last `period` losses with
//          a plain single-pass mean.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// NOTE: this is deliberately a plain average over the trailing window, not
// Wilder's recursive smoothing. The dashboard has always quoted this variant
// and downstream consumers depend on the exact values it produces.
// =============================================================================

/// Compute the current RSI over the trailing `period` deltas.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period + 1` => `None` (need `period` deltas)
/// - Average loss of zero (no down moves in the window) => `Some(100.0)`,
///   avoiding the division by zero. A perfectly flat window also lands here.
/// - Non-finite result (NaN in the window) => `None`.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let window = &deltas[deltas.len() - period..];

    let (sum_gain, sum_loss) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
        if d > 0.0 {
            (g + d, l)
        } else {
            (g, l + d.abs())
        }
    });

    let period_f = period as f64;
    let avg_gain = sum_gain / period_f;
    let avg_loss = sum_loss / period_f;

    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return None;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);

    if rsi.is_finite() {
        Some(rsi)
    } else {
        None
    }
}
