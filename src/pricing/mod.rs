// =============================================================================
// Options Pricing Module
// =============================================================================
//
// Pure, side-effect-free option valuation. The single entry point is
// `black_scholes::price`, which returns `Option<OptionQuote>` so callers are
// forced to handle invalid parameters and numerical degeneracy explicitly.

pub mod black_scholes;
