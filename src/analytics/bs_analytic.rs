// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options this has closed-form solutions involving the
//! cumulative normal distribution Φ(x). The pricing functions handle
//! the degenerate region explicitly: at `σ ≤ 0` or `t ≤ 0` the price
//! collapses to the discounted intrinsic value. Greek formulas assume
//! `σ > 0` and `t > 0`.

use crate::math_utils::{norm_cdf, norm_pdf};

/// Present value of one unit paid at time `t`
pub fn discount_factor(r: f64, t: f64) -> f64 {
    (-r * t).exp()
}

fn d1(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

fn d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    d1(s, k, r, sigma, t) - sigma * t.sqrt()
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
///
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Limits
/// - σ → 0 with T fixed: converges to `max(S - K*e^(-rT), 0)`
/// - σ → ∞ with T fixed: converges to `S`
/// - T → 0: converges to the intrinsic value `max(S - K, 0)`
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let disc = discount_factor(r, t);
    if sigma <= 0.0 || t <= 0.0 {
        return (s - k * disc).max(0.0);
    }
    s * norm_cdf(d1(s, k, r, sigma, t)) - k * disc * norm_cdf(d2(s, k, r, sigma, t))
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// Satisfies put-call parity: `C - P = S - K*e^(-rT)`.
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let disc = discount_factor(r, t);
    if sigma <= 0.0 || t <= 0.0 {
        return (k * disc - s).max(0.0);
    }
    k * disc * norm_cdf(-d2(s, k, r, sigma, t)) - s * norm_cdf(-d1(s, k, r, sigma, t))
}

/// Black-Scholes Delta (∂V/∂S) for a European call
///
/// # Formula
/// ```text
/// Δ = Φ(d₁)
/// ```
///
/// Hedge ratio in [0, 1]; shares held per option sold.
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    norm_cdf(d1(s, k, r, sigma, t))
}

/// Black-Scholes Gamma (∂²V/∂S²) for a European call
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
///
/// Convexity of the price in the underlying; identical for calls and puts.
pub fn bs_call_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    norm_pdf(d1(s, k, r, sigma, t)) / (s * sigma * t.sqrt())
}

/// Black-Scholes Vega (∂V/∂σ) for a European call
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
///
/// Always positive for long options; largest at-the-money.
pub fn bs_call_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    s * norm_pdf(d1(s, k, r, sigma, t)) * t.sqrt()
}

/// Black-Scholes Theta (∂V/∂t) for a European call
///
/// # Formula
/// ```text
/// Θ = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// ```
///
/// Time decay per year; usually negative for long options.
pub fn bs_call_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    (-s * norm_pdf(d1(s, k, r, sigma, t)) * sigma) / (2.0 * t.sqrt())
        - r * k * discount_factor(r, t) * norm_cdf(d2(s, k, r, sigma, t))
}

/// Black-Scholes Rho (∂V/∂r) for a European call
///
/// # Formula
/// ```text
/// ρ = K * T * e^(-rT) * Φ(d₂)
/// ```
///
/// Positive for calls; higher rates raise the forward.
pub fn bs_call_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    k * t * discount_factor(r, t) * norm_cdf(d2(s, k, r, sigma, t))
}
