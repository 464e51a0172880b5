//! Correlation structure for multi-asset simulation.
//!
//! - [`CorrelationMatrix`]: validated N×N correlation matrix
//! - [`CovarianceMatrix`]: Σ = diag(vol)·Corr·diag(vol)
//! - [`CholeskyFactor`]: lower-triangular L with Σ = L·Lᵀ, tolerant of
//!   positive semi-definite (rank-deficient) input

pub mod correlation;

pub use correlation::{CholeskyFactor, CorrelationError, CorrelationMatrix, CovarianceMatrix};
