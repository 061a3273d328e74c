// =============================================================================
// Runtime Configuration — Hot-reloadable desk settings with atomic save
// =============================================================================
//
// Central configuration hub for the Meridian stock desk. The watchlist and
// the pricing defaults can be changed at runtime through the settings API
// without a restart.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_watchlist() -> Vec<String> {
    vec![
        "AAPL".to_string(),
        "MSFT".to_string(),
        "GOOGL".to_string(),
        "AMZN".to_string(),
        "TSLA".to_string(),
    ]
}

fn default_risk_free_rate() -> f64 {
    0.05
}

fn default_volatility() -> f64 {
    0.25
}

// =============================================================================
// PricingDefaults
// =============================================================================

/// Fallback parameters applied when a pricing request omits a field.
/// These mirror the pre-filled values in the options calculator UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingDefaults {
    /// Annualised risk-free rate (0.05 == 5%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Annualised implied volatility (0.25 == 25%).
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            volatility: default_volatility(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the desk.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Symbols shown on the dashboard.
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,

    /// Fallbacks for omitted option-pricing request fields.
    #[serde(default)]
    pub pricing_defaults: PricingDefaults,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            watchlist: default_watchlist(),
            pricing_defaults: PricingDefaults::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            watchlist = ?config.watchlist,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    ///
    /// This prevents corruption if the process crashes mid-write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        // Atomic write: write to a temporary sibling file, then rename.
        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}
