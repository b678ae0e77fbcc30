// src/rng.rs
//! Random Number Generation for Path Simulation
//!
//! # Design Philosophy
//!
//! Monte Carlo pricing and path ensembles need random numbers with
//! specific properties:
//! 1. **Reproducibility**: Same seed → same results (critical for debugging/validation)
//! 2. **Parallel safety**: Different paths must have independent streams
//! 3. **Statistical quality**: Good distributional properties for the Gaussian draws
//!
//! # Per-Path Seeding
//!
//! Each path owns its own `StdRng` seeded from `base_seed + path_id`, so
//! a parallel sweep produces the same ensemble regardless of thread
//! count or scheduling order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Hands out independent, reproducible generators for parallel workers
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create the generator for a specific path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

/// Seed a standalone generator directly
pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw a standard normal variate
pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
