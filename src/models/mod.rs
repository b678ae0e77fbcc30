// src/models/mod.rs
pub mod gbm;
