// =============================================================================
// Black-Scholes Option Pricing — European Calls & Puts with Greeks
// =============================================================================
//
// Closed-form Black-Scholes-Merton model (no dividends):
//
//   d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//   d2 = d1 - σ·√T
//   call = S·N(d1) - K·e^(-rT)·N(d2)
//   put  = K·e^(-rT)·N(-d2) - S·N(-d1)
//
// Greeks:
//   delta = N(d1)                  (call delta)
//   gamma = n(d1) / (S·σ·√T)
//   theta = annual theta / 365     (per calendar day)
//   vega  = S·√T·n(d1) / 100       (per 1% volatility move)
//   rho   = K·T·e^(-rT)·N(d2)/100  (per 1% rate move, call only)
//
// N(x) is the Abramowitz & Stegun rational approximation (26.2.17), accurate
// to ~1e-7. Every consumer of these prices goes through the same polynomial,
// so results stay reproducible across the desk.
// =============================================================================

use serde::Serialize;

/// Days used to convert a days-to-expiry quote into year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

// =============================================================================
// Inputs & outputs
// =============================================================================

/// Market and contract parameters for a European option.
///
/// `time_to_expiry_years` is the year fraction until expiry. Use
/// [`OptionInputs::from_days`] when the caller quotes expiry in calendar days.
#[derive(Debug, Clone, Copy)]
pub struct OptionInputs {
    pub stock_price: f64,
    pub strike_price: f64,
    pub time_to_expiry_years: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

impl OptionInputs {
    /// Build inputs from a days-to-expiry quote (divided by 365).
    pub fn from_days(
        stock_price: f64,
        strike_price: f64,
        days_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            stock_price,
            strike_price,
            time_to_expiry_years: days_to_expiry / DAYS_PER_YEAR,
            risk_free_rate,
            volatility,
        }
    }
}

/// Full-precision pricing output: both legs plus the five Greeks.
///
/// `theta` is per calendar day; `vega` and `rho` are per 1% move in
/// volatility and rate respectively. `rho` is the call rho (put rho is
/// never quoted by the desk).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptionQuote {
    pub call_price: f64,
    pub put_price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

// =============================================================================
// Standard normal distribution
// =============================================================================

/// Standard normal CDF via the Abramowitz & Stegun rational approximation.
///
/// Maximum absolute error ~1e-7 — more than enough for display-precision
/// option prices, and cheap enough to call seven times per quote.
fn norm_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let p = d * t
        * (0.3193815
            + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if x > 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Standard normal PDF: exp(-x²/2) / √(2π).
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

// =============================================================================
// Pricing
// =============================================================================

/// Price a European option and its Greeks.
///
/// Returns `None` (never a partial quote) when:
/// - any of S, K, T, σ is zero or negative,
/// - any input is non-finite (r may be zero or negative, but must be finite),
/// - any of the seven outputs comes out non-finite.
///
/// Call and put prices are clamped to >= 0; floating-point noise near a
/// degenerate strike or expiry can produce tiny negative values.
pub fn price(inputs: &OptionInputs) -> Option<OptionQuote> {
    let OptionInputs {
        stock_price: s,
        strike_price: k,
        time_to_expiry_years: t,
        risk_free_rate: r,
        volatility: sigma,
    } = *inputs;

    if s <= 0.0 || k <= 0.0 || t <= 0.0 || sigma <= 0.0 {
        return None;
    }
    if !s.is_finite() || !k.is_finite() || !t.is_finite() || !r.is_finite() || !sigma.is_finite()
    {
        return None;
    }

    let sqrt_t = t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;

    let nd1 = norm_cdf(d1);
    let nd2 = norm_cdf(d2);
    let n_neg_d1 = norm_cdf(-d1);
    let n_neg_d2 = norm_cdf(-d2);
    let pdf_d1 = norm_pdf(d1);

    let discount = (-r * t).exp();

    let call_price = s * nd1 - k * discount * nd2;
    let put_price = k * discount * n_neg_d2 - s * n_neg_d1;

    let delta = nd1;
    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let theta_annual = -(s * pdf_d1 * sigma) / (2.0 * sqrt_t) - r * k * discount * nd2;
    let theta = theta_annual / 365.0;
    let vega = s * sqrt_t * pdf_d1 / 100.0;
    let rho = k * t * discount * nd2 / 100.0;

    let quote = OptionQuote {
        call_price: call_price.max(0.0),
        put_price: put_price.max(0.0),
        delta,
        gamma,
        theta,
        vega,
        rho,
    };

    let all_finite = quote.call_price.is_finite()
        && quote.put_price.is_finite()
        && quote.delta.is_finite()
        && quote.gamma.is_finite()
        && quote.theta.is_finite()
        && quote.vega.is_finite()
        && quote.rho.is_finite();

    if all_finite {
        Some(quote)
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> OptionInputs {
        OptionInputs {
            stock_price: s,
            strike_price: k,
            time_to_expiry_years: t,
            risk_free_rate: r,
            volatility: sigma,
        }
    }

    // ---- norm_cdf --------------------------------------------------------

    #[test]
    fn norm_cdf_at_zero() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn norm_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.0, 1.96, 3.0] {
            let sum = norm_cdf(x) + norm_cdf(-x);
            assert!((sum - 1.0).abs() < 1e-7, "N({x}) + N(-{x}) = {sum}");
        }
    }

    #[test]
    fn norm_cdf_known_values() {
        // Standard normal table values.
        assert!((norm_cdf(1.0) - 0.8413447).abs() < 1e-6);
        assert!((norm_cdf(-1.0) - 0.1586553).abs() < 1e-6);
        assert!((norm_cdf(1.96) - 0.9750021).abs() < 1e-6);
    }

    #[test]
    fn norm_cdf_tails() {
        assert!(norm_cdf(8.0) > 0.9999999);
        assert!(norm_cdf(-8.0) < 1e-7);
    }

    // ---- price: rejection ------------------------------------------------

    #[test]
    fn rejects_zero_stock_price() {
        assert!(price(&inputs(0.0, 100.0, 0.5, 0.05, 0.2)).is_none());
    }

    #[test]
    fn rejects_negative_strike() {
        assert!(price(&inputs(100.0, -5.0, 0.5, 0.05, 0.2)).is_none());
    }

    #[test]
    fn rejects_zero_volatility() {
        assert!(price(&inputs(100.0, 100.0, 0.5, 0.05, 0.0)).is_none());
    }

    #[test]
    fn rejects_negative_expiry() {
        assert!(price(&inputs(100.0, 100.0, -1.0, 0.05, 0.2)).is_none());
    }

    #[test]
    fn rejects_nan_volatility() {
        assert!(price(&inputs(100.0, 100.0, 0.5, 0.05, f64::NAN)).is_none());
    }

    #[test]
    fn rejects_infinite_rate() {
        assert!(price(&inputs(100.0, 100.0, 0.5, f64::INFINITY, 0.2)).is_none());
    }

    #[test]
    fn accepts_zero_and_negative_rate() {
        assert!(price(&inputs(100.0, 100.0, 0.5, 0.0, 0.2)).is_some());
        assert!(price(&inputs(100.0, 100.0, 0.5, -0.01, 0.2)).is_some());
    }

    // ---- price: known values ---------------------------------------------

    #[test]
    fn atm_30_day_reference_values() {
        // S=100, K=100, T=30/365, r=5%, σ=20%. Reference values from a
        // standard Black-Scholes table: call ≈ 2.49, put ≈ 2.08, Δ ≈ 0.54.
        let q = price(&inputs(100.0, 100.0, 30.0 / 365.0, 0.05, 0.20)).unwrap();
        assert!((q.call_price - 2.49).abs() < 0.05, "call {}", q.call_price);
        assert!((q.put_price - 2.08).abs() < 0.05, "put {}", q.put_price);
        assert!((q.delta - 0.54).abs() < 0.01, "delta {}", q.delta);
    }

    #[test]
    fn atm_30_day_higher_vol_reference_values() {
        // Same contract at σ=25%: call ≈ 3.06, put ≈ 2.65.
        let q = price(&inputs(100.0, 100.0, 30.0 / 365.0, 0.05, 0.25)).unwrap();
        assert!((q.call_price - 3.06).abs() < 0.05, "call {}", q.call_price);
        assert!((q.put_price - 2.65).abs() < 0.05, "put {}", q.put_price);
    }

    #[test]
    fn atm_zero_rate_call_equals_put() {
        // With S=K and r=0, put-call parity collapses to call == put.
        let q = price(&inputs(100.0, 100.0, 0.25, 0.0, 0.3)).unwrap();
        assert!(
            (q.call_price - q.put_price).abs() < 1e-9,
            "call {} put {}",
            q.call_price,
            q.put_price
        );
    }

    #[test]
    fn put_call_parity_holds() {
        // call - put == S - K·e^(-rT) for any valid parameter set.
        let cases = [
            (100.0, 100.0, 30.0 / 365.0, 0.05, 0.25),
            (150.0, 100.0, 1.0, 0.03, 0.4),
            (80.0, 120.0, 0.5, 0.01, 0.15),
            (50.0, 45.0, 2.0, -0.005, 0.6),
        ];
        for &(s, k, t, r, sigma) in &cases {
            let q = price(&inputs(s, k, t, r, sigma)).unwrap();
            let lhs = q.call_price - q.put_price;
            let rhs = s - k * (-r * t).exp();
            let tol = 1e-6 * s.max(1.0);
            assert!(
                (lhs - rhs).abs() < tol,
                "parity violated for S={s} K={k}: {lhs} vs {rhs}"
            );
        }
    }

    // ---- price: Greek ranges ---------------------------------------------

    #[test]
    fn delta_gamma_vega_ranges() {
        let cases = [
            (100.0, 100.0, 0.5, 0.05, 0.2),
            (200.0, 100.0, 0.1, 0.02, 0.3),
            (50.0, 100.0, 1.5, 0.0, 0.5),
        ];
        for &(s, k, t, r, sigma) in &cases {
            let q = price(&inputs(s, k, t, r, sigma)).unwrap();
            assert!((0.0..=1.0).contains(&q.delta), "delta {} out of range", q.delta);
            assert!(q.gamma >= 0.0, "gamma {} negative", q.gamma);
            assert!(q.vega >= 0.0, "vega {} negative", q.vega);
        }
    }

    #[test]
    fn deep_itm_call_delta_near_one() {
        let q = price(&inputs(300.0, 100.0, 0.25, 0.05, 0.2)).unwrap();
        assert!(q.delta > 0.999, "delta {}", q.delta);
    }

    #[test]
    fn deep_otm_call_delta_near_zero() {
        let q = price(&inputs(30.0, 100.0, 0.25, 0.05, 0.2)).unwrap();
        assert!(q.delta < 0.001, "delta {}", q.delta);
    }

    #[test]
    fn prices_clamped_non_negative() {
        // Deep out-of-the-money with a short expiry: raw prices approach zero
        // and may dip slightly below from rounding.
        let q = price(&inputs(10.0, 500.0, 1.0 / 365.0, 0.05, 0.2)).unwrap();
        assert!(q.call_price >= 0.0);
        assert!(q.put_price >= 0.0);
    }

    // ---- from_days -------------------------------------------------------

    #[test]
    fn from_days_converts_to_year_fraction() {
        let i = OptionInputs::from_days(100.0, 100.0, 30.0, 0.05, 0.25);
        assert!((i.time_to_expiry_years - 30.0 / 365.0).abs() < 1e-12);
    }
}
