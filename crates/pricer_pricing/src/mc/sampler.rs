//! Correlated normal increments from a fixed seed.
//!
//! The sampler factorises `Σ = diag(vol) · C · diag(vol)` once and maps
//! independent standard normals through the lower-triangular factor, one
//! N-vector per time step.

use pricer_core::types::PricingError;
use pricer_models::models::{CholeskyFactor, CorrelationMatrix};

use crate::rng::PricerRng;

/// A batch of correlated zero-mean normal vectors, one per time step.
///
/// Stored row-major: `data[t * dim + i]` is asset `i` at step `t`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationIncrements {
    dim: usize,
    data: Vec<f64>,
}

impl SimulationIncrements {
    /// Number of assets per increment vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of increment vectors.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Increment vector at step `t`.
    #[inline]
    pub fn step(&self, t: usize) -> Option<&[f64]> {
        self.data.get(t * self.dim..(t + 1) * self.dim)
    }

    /// Iterates increment vectors in time order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Component `asset` of every increment, in time order.
    pub fn asset(&self, asset: usize) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(move |row| row[asset])
    }
}

/// Draws [`SimulationIncrements`] with covariance `diag(vol) C diag(vol)`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::CorrelationMatrix;
/// use pricer_pricing::mc::CorrelatedIncrementSampler;
///
/// let corr = CorrelationMatrix::pair(0.7).unwrap();
/// let sampler = CorrelatedIncrementSampler::new(&[0.2, 0.15], &corr, 10987).unwrap();
///
/// let a = sampler.sample(50);
/// let b = sampler.sample(50);
/// assert_eq!(a, b);
/// assert_eq!(a.n_steps(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct CorrelatedIncrementSampler {
    factor: CholeskyFactor,
    seed: u64,
}

impl CorrelatedIncrementSampler {
    /// Builds the covariance from `vols` and `corr` and factorises it.
    ///
    /// # Errors
    ///
    /// - `NonPositiveInput` for a negative volatility
    /// - `DimensionMismatch` if `vols.len() != corr.dim()` or there are no assets
    /// - `InvalidCovariance` if Σ is not positive semi-definite
    pub fn new(vols: &[f64], corr: &CorrelationMatrix, seed: u64) -> Result<Self, PricingError> {
        if corr.dim() == 0 {
            return Err(PricingError::DimensionMismatch {
                name: "correlation",
                expected: vols.len().max(1),
                got: 0,
            });
        }
        for &vol in vols {
            PricingError::require_non_negative("vol", vol)?;
        }
        PricingError::require_len("vols", corr.dim(), vols.len())?;

        let factor = corr.covariance(vols)?.cholesky()?;
        tracing::debug!(dim = factor.dim(), seed, "covariance factorised");
        Ok(Self { factor, seed })
    }

    /// Number of assets.
    #[inline]
    pub fn dim(&self) -> usize {
        self.factor.dim()
    }

    /// Seed every batch is drawn from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws exactly `n_steps` correlated vectors.
    ///
    /// Each call restarts from the sampler's seed, so repeated calls return
    /// bit-identical batches.
    pub fn sample(&self, n_steps: usize) -> SimulationIncrements {
        let dim = self.factor.dim();
        let mut rng = PricerRng::from_seed(self.seed);
        let mut z = vec![0.0; dim];
        let mut data = vec![0.0; n_steps * dim];

        for row in data.chunks_exact_mut(dim) {
            rng.fill_normal(&mut z);
            self.factor.transform_into(&z, row);
        }
        SimulationIncrements { dim, data }
    }
}
