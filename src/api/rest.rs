// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The pricing and indicator endpoints
// are stateless compute: the request body carries every input and the
// response carries full-precision floats — rounding for display is the
// client's job.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::indicators::{self, MIN_SNAPSHOT_LEN};
use crate::pricing::black_scholes::{self, OptionInputs};
use crate::types::PricePoint;

/// Path of the on-disk runtime config, shared with main.
pub const CONFIG_PATH: &str = "desk_config.json";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/options/price", post(price_option))
        .route("/api/v1/indicators", post(compute_indicators))
        .route("/api/v1/settings", get(get_settings))
        .route("/api/v1/settings", post(update_settings))
        .layer(cors)
        .with_state(state)
}

/// JSON error body shared by every failure response.
fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Option pricing
// =============================================================================

#[derive(Debug, Deserialize)]
struct OptionPriceRequest {
    stock_price: f64,
    strike_price: f64,
    days_to_expiry: f64,
    /// Falls back to the configured default when omitted.
    #[serde(default)]
    volatility: Option<f64>,
    /// Falls back to the configured default when omitted.
    #[serde(default)]
    risk_free_rate: Option<f64>,
}

async fn price_option(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OptionPriceRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let (default_r, default_sigma) = {
        let config = state.runtime_config.read();
        (
            config.pricing_defaults.risk_free_rate,
            config.pricing_defaults.volatility,
        )
    };

    let inputs = OptionInputs::from_days(
        req.stock_price,
        req.strike_price,
        req.days_to_expiry,
        req.risk_free_rate.unwrap_or(default_r),
        req.volatility.unwrap_or(default_sigma),
    );

    match black_scholes::price(&inputs) {
        Some(quote) => Ok(Json(quote)),
        None => {
            warn!(
                stock_price = req.stock_price,
                strike_price = req.strike_price,
                days_to_expiry = req.days_to_expiry,
                "option pricing rejected"
            );
            Err(error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid option parameters: stock price, strike, days to expiry and \
                 volatility must be positive finite numbers",
            ))
        }
    }
}

// =============================================================================
// Technical indicators
// =============================================================================

#[derive(Debug, Deserialize)]
struct IndicatorRequest {
    /// Daily closes, chronological ascending.
    series: Vec<PricePoint>,
}

async fn compute_indicators(
    Json(req): Json<IndicatorRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if req.series.len() < MIN_SNAPSHOT_LEN {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "insufficient data: need at least {MIN_SNAPSHOT_LEN} closing prices, got {}",
                req.series.len()
            ),
        ));
    }

    let closes: Vec<f64> = req.series.iter().map(|p| p.close).collect();

    match indicators::compute_snapshot(&closes) {
        Some(snapshot) => Ok(Json(snapshot)),
        None => {
            warn!(len = closes.len(), "indicator computation rejected");
            Err(error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "indicator computation failed: series contains non-finite closes",
            ))
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

#[derive(Serialize)]
struct SettingsResponse {
    watchlist: Vec<String>,
    risk_free_rate: f64,
    volatility: f64,
}

async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.runtime_config.read();
    Json(SettingsResponse {
        watchlist: config.watchlist.clone(),
        risk_free_rate: config.pricing_defaults.risk_free_rate,
        volatility: config.pricing_defaults.volatility,
    })
}

#[derive(Debug, Deserialize)]
struct SettingsUpdate {
    #[serde(default)]
    watchlist: Option<Vec<String>>,
    #[serde(default)]
    risk_free_rate: Option<f64>,
    #[serde(default)]
    volatility: Option<f64>,
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // Validate before taking the write lock.
    if let Some(r) = update.risk_free_rate {
        if !r.is_finite() {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "risk_free_rate must be a finite number",
            ));
        }
    }
    if let Some(sigma) = update.volatility {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "volatility must be a positive finite number",
            ));
        }
    }

    let mut config = state.runtime_config.write();
    let mut changes = Vec::new();

    if let Some(watchlist) = update.watchlist {
        let watchlist: Vec<String> = watchlist
            .into_iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if config.watchlist != watchlist {
            changes.push(format!("watchlist: {:?} -> {:?}", config.watchlist, watchlist));
            config.watchlist = watchlist;
        }
    }
    if let Some(r) = update.risk_free_rate {
        if config.pricing_defaults.risk_free_rate != r {
            changes.push(format!(
                "risk_free_rate: {} -> {r}",
                config.pricing_defaults.risk_free_rate
            ));
            config.pricing_defaults.risk_free_rate = r;
        }
    }
    if let Some(sigma) = update.volatility {
        if config.pricing_defaults.volatility != sigma {
            changes.push(format!(
                "volatility: {} -> {sigma}",
                config.pricing_defaults.volatility
            ));
            config.pricing_defaults.volatility = sigma;
        }
    }

    let snapshot = SettingsResponse {
        watchlist: config.watchlist.clone(),
        risk_free_rate: config.pricing_defaults.risk_free_rate,
        volatility: config.pricing_defaults.volatility,
    };

    if !changes.is_empty() {
        info!(changes = ?changes, "settings updated");

        // Clone config and drop the write lock before touching the disk.
        let config_clone = config.clone();
        drop(config);

        // Save to disk (best-effort).
        if let Err(e) = config_clone.save(CONFIG_PATH) {
            warn!(error = %e, "failed to save settings to disk");
        }

        state.increment_version();
    }

    Ok(Json(snapshot))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_request_optional_fields_default_to_none() {
        let json = r#"{ "stock_price": 100.0, "strike_price": 105.0, "days_to_expiry": 30.0 }"#;
        let req: OptionPriceRequest = serde_json::from_str(json).unwrap();
        assert!(req.volatility.is_none());
        assert!(req.risk_free_rate.is_none());
    }

    #[test]
    fn option_request_full_body_parses() {
        let json = r#"{
            "stock_price": 100.0,
            "strike_price": 105.0,
            "days_to_expiry": 30.0,
            "volatility": 0.3,
            "risk_free_rate": 0.04
        }"#;
        let req: OptionPriceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.volatility, Some(0.3));
        assert_eq!(req.risk_free_rate, Some(0.04));
    }

    #[test]
    fn indicator_request_parses_series() {
        let json = r#"{ "series": [
            { "date": "2024-01-02", "close": 185.64 },
            { "date": "2024-01-03", "close": 184.25 }
        ] }"#;
        let req: IndicatorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.series.len(), 2);
        assert!((req.series[1].close - 184.25).abs() < 1e-12);
    }

    #[test]
    fn settings_update_all_fields_optional() {
        let update: SettingsUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.watchlist.is_none());
        assert!(update.risk_free_rate.is_none());
        assert!(update.volatility.is_none());
    }
}
