// src/models/gbm.rs
//! Geometric Brownian Motion path simulation
//!
//! # Mathematical Framework
//!
//! Prices evolve by relative moves, so updates are multiplicative and
//! simulated prices can never go negative:
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2)·dt + σ·√dt·Z),    Z ~ N(0,1)
//! ```
//!
//! The seeded simulator builds a path from cumulative Gaussian
//! log-increments. Without correction the exponentiation introduces an
//! upward bias of exp(σ²·t/2) in the expected price; the variance-drag
//! term σ²/2·dt·k removes it so that
//! ```text
//! E[S_k] = S_0    for every sample k.
//! ```

use crate::error::{validation::*, PricerError, PricerResult};
use crate::rng;
use rayon::prelude::*;

pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Advance one step with the exact GBM solution
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }
}

/// Configuration for a seeded price path
#[derive(Clone)]
pub struct PathConfig {
    /// Start price, the value of the first sample
    pub s0: f64,
    /// Annualized volatility; zero is legal and yields a flat path
    pub sigma: f64,
    /// Horizon in years
    pub t: f64,
    /// Time step in years
    pub dt: f64,
    pub seed: u64,
    /// Remove the variance drag so the expected price stays at `s0`
    pub demean: bool,
}

impl PathConfig {
    pub fn validate(&self) -> PricerResult<()> {
        validate_positive("s0", self.s0)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        validate_positive("dt", self.dt)?;
        if self.n_points() < 1 {
            return Err(PricerError::InvalidConfiguration {
                field: "t".to_string(),
                reason: format!(
                    "horizon {} rounds to zero samples at dt = {}",
                    self.t, self.dt
                ),
            });
        }
        Ok(())
    }

    /// Number of samples in the path; sample `k` sits at time `k·dt`
    pub fn n_points(&self) -> usize {
        (self.t / self.dt).round() as usize
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            s0: 100.0,
            sigma: 0.2,
            t: 1.0,
            dt: 1.0 / 252.0,
            seed: 12345,
            demean: true,
        }
    }
}

/// Simulate one seeded price path
///
/// Draws the Gaussian log-increments with standard deviation `σ·√dt`,
/// accumulates them, subtracts the variance drag `σ²/2·dt·k` when
/// `demean` is set, and exponentiates. The first increment is pinned to
/// zero so the path starts exactly at `s0`.
pub fn simulate_path(cfg: &PathConfig) -> PricerResult<Vec<f64>> {
    cfg.validate()?;
    let n = cfg.n_points();
    let mut rng = rng::seed_rng_from_u64(cfg.seed);
    let step_sd = cfg.sigma * cfg.dt.sqrt();
    let drag = 0.5 * cfg.sigma * cfg.sigma * cfg.dt;

    let mut prices = Vec::with_capacity(n);
    let mut log_level = 0.0;
    for k in 0..n {
        if k > 0 {
            log_level += step_sd * rng::get_normal_draw(&mut rng);
        }
        let exponent = if cfg.demean {
            log_level - drag * k as f64
        } else {
            log_level
        };
        prices.push(cfg.s0 * exponent.exp());
    }
    Ok(prices)
}

/// Simulate an ensemble of paths in parallel; path `i` is seeded `seed + i`
pub fn simulate_paths(cfg: &PathConfig, n_paths: usize) -> PricerResult<Vec<Vec<f64>>> {
    cfg.validate()?;
    validate_paths(n_paths)?;

    (0..n_paths)
        .into_par_iter()
        .map(|i| {
            let mut path_cfg = cfg.clone();
            path_cfg.seed = cfg.seed.wrapping_add(i as u64);
            simulate_path(&path_cfg)
        })
        .collect()
}

/// Pin the final sample of a path to `target`, Brownian-bridge style
///
/// Each sample gives up its share `k/(n-1)` of the final deviation from
/// the start and gains the straight line from start to `target`. The
/// first sample is preserved and the last equals `target` exactly; the
/// interior keeps the original path's wiggle.
pub fn pin_path_endpoint(path: &[f64], target: f64) -> Vec<f64> {
    let n = path.len();
    if n < 2 {
        return vec![target; n];
    }
    let start = path[0];
    let final_dev = path[n - 1] - start;
    (0..n)
        .map(|k| {
            let w = k as f64 / (n - 1) as f64;
            let dev = path[k] - start;
            dev - w * final_dev + start + w * (target - start)
        })
        .collect()
}
