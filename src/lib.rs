//! # fair-price: Geometric Brownian Motion and Black-Scholes Pricing
//!
//! A Rust library for simulating geometric Brownian motion price paths and
//! pricing European options, both in closed form and by Monte Carlo.
//!
//! ## Key Features
//!
//! - **Seeded Simulation**: Reproducible GBM path ensembles with per-path seeding
//! - **Closed-Form Pricing**: Black-Scholes calls and puts with full Greeks
//! - **Parallel Monte Carlo**: Rayon-backed pricing with antithetic and control variates
//! - **Terminal Laws**: Lognormal terminal distribution with exercise probabilities
//! - **Charts**: Path ensembles, histograms, and convergence plots via plotters
//!
//! ## Quick Start
//!
//! ```rust
//! use fair_price::mc::mc_engine::{mc_price_european, McConfig};
//! use fair_price::mc::payoffs::Payoff;
//!
//! // Configure European call option
//! let config = McConfig {
//!     paths: 100_000,
//!     s0: 100.0,      // Spot price
//!     r: 0.05,        // Risk-free rate
//!     sigma: 0.2,     // Volatility
//!     t: 1.0,         // Time to expiration
//!     payoff: Payoff::EuropeanCall { k: 100.0 },
//!     ..Default::default()
//! };
//!
//! // Price the option
//! let (price, variance) = mc_price_european(&config).expect("Valid configuration");
//! println!("Option price: {:.4} ± {:.4}", price, variance.sqrt());
//! ```
//!
//! ## Mathematical Foundation
//!
//! Prices follow geometric Brownian motion: log-returns are accumulated
//! Gaussian increments, optionally de-meaned by the variance drag, and
//! exponentiated onto the start price. European option values come from
//! the Black-Scholes formula or from discounted expected payoffs over
//! simulated terminal prices.

// Module declarations
pub mod error;
pub mod rng;
pub mod math_utils;
pub mod models;
pub mod analytics;
pub mod mc;
pub mod charts;
pub mod output;

// Re-export commonly used types for convenience
pub use error::{PricerError, PricerResult};
