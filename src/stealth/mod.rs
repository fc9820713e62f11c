//! Stealth and anti-detection primitives
//!
//! This module holds the random source every humanized behaviour draws from:
//! - Uniform and inclusive-range integer draws
//! - Gaussian draws for centre-biased positions and intervals
//! - Distinct selection for "deliberately missed" items

pub mod humanize;

pub use humanize::*;
