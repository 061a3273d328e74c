// =============================================================================
// Shared types used across the Meridian stock desk
// =============================================================================

use serde::{Deserialize, Serialize};

/// A single daily bar close as supplied by the dashboard client.
///
/// `date` is an opaque label (ISO or locale date string) carried through for
/// charting; only ordering matters, and the series is expected to be
/// chronologically ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}
