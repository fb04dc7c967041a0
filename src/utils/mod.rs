//! Numerical utilities for model estimation.

pub mod optimization;

pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
