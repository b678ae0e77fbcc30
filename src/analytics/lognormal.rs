// src/analytics/lognormal.rs
//! Terminal distribution of a GBM price
//!
//! # Mathematical Framework
//!
//! Under geometric Brownian motion the log-return is Gaussian:
//! ```text
//! ln(S_t / S_0) ~ N((μ - σ²/2)·t, σ²·t)
//! ```
//! so the terminal price itself is lognormal. With μ set to the
//! risk-free rate, the probability mass above a strike K equals Φ(d₂),
//! the risk-neutral probability that a call struck at K finishes
//! in-the-money.

use crate::error::{validation::*, PricerResult};
use crate::math_utils::{norm_cdf, norm_pdf};

/// Lognormal law of the GBM price at a fixed horizon
#[derive(Debug, Clone, Copy)]
pub struct TerminalDistribution {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    pub t: f64,
}

impl TerminalDistribution {
    pub fn new(s0: f64, mu: f64, sigma: f64, t: f64) -> PricerResult<Self> {
        validate_positive("s0", s0)?;
        validate_finite("mu", mu)?;
        validate_positive("sigma", sigma)?;
        validate_positive("t", t)?;
        Ok(TerminalDistribution { s0, mu, sigma, t })
    }

    /// Mean of ln(S_t / S_0)
    fn log_mean(&self) -> f64 {
        (self.mu - 0.5 * self.sigma * self.sigma) * self.t
    }

    /// Standard deviation of ln(S_t / S_0)
    fn log_sd(&self) -> f64 {
        self.sigma * self.t.sqrt()
    }

    /// Probability density at price `s`
    pub fn pdf(&self, s: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        let z = ((s / self.s0).ln() - self.log_mean()) / self.log_sd();
        norm_pdf(z) / (s * self.log_sd())
    }

    /// Probability that the terminal price falls at or below `s`
    pub fn cdf(&self, s: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        let z = ((s / self.s0).ln() - self.log_mean()) / self.log_sd();
        norm_cdf(z)
    }

    /// Expected terminal price, `s0 * exp(μ·t)`
    pub fn mean(&self) -> f64 {
        self.s0 * (self.mu * self.t).exp()
    }

    /// Probability mass above `k`; the exercise probability of a call
    /// struck at `k` when `μ` is the risk-free rate
    pub fn prob_above(&self, k: f64) -> f64 {
        1.0 - self.cdf(k)
    }
}
