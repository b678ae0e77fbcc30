//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Payoffs operate on a simulated price path. European contracts only
//! look at the terminal sample:
//!
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! # Implementation Notes
//!
//! `calculate` takes the full price path `&[f64]` so that the same
//! interface works for single-step terminal draws and for multi-step
//! simulated paths. The path must be non-empty.

use std::f64;

/// Enumeration of supported option payoff types
#[derive(Clone)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    /// Calculate the payoff from a simulated price path `[S_0, ..., S_T]`
    pub fn calculate(&self, path: &[f64]) -> f64 {
        match self {
            Payoff::EuropeanCall { k } => (path.last().unwrap() - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - path.last().unwrap()).max(0.0),
        }
    }

    /// The contract strike
    pub fn strike(&self) -> f64 {
        match self {
            Payoff::EuropeanCall { k } | Payoff::EuropeanPut { k } => *k,
        }
    }
}
