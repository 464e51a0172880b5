//! Correlation matrices, covariance construction and Cholesky factorisation.
//!
//! ## Mathematical Background
//!
//! Given `n` independent standard normals `Z`, correlated normals with
//! covariance `Σ` are obtained as `W = L Z` where `Σ = L Lᵀ`.
//!
//! The factorisation here accepts positive *semi*-definite input: when a
//! pivot of the running Schur complement is zero (within tolerance) the
//! corresponding column of `L` is zero, which is exactly the case for
//! perfectly correlated legs or zero-volatility assets. A negative pivot,
//! or a non-zero off-diagonal residual against a zero pivot, means `Σ` is
//! not PSD and factorisation fails.
//!
//! ## Usage
//!
//! ```
//! use pricer_models::models::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.7], vec![0.7, 1.0]]).unwrap();
//! let cov = corr.covariance(&[0.2, 0.15]).unwrap();
//! let chol = cov.cholesky().unwrap();
//!
//! let w = chol.transform(&[0.5, -0.3]);
//! assert_eq!(w.len(), 2);
//! ```

use pricer_core::types::PricingError;
use thiserror::Error;

/// Relative tolerance used to classify Schur-complement pivots as zero.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Absolute tolerance for diagonal and symmetry checks.
const ENTRY_TOLERANCE: f64 = 1e-10;

/// Error types for correlation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Matrix is not positive semi-definite.
    #[error("Matrix is not positive semi-definite (pivot {pivot} at index {index})")]
    NotPositiveSemiDefinite {
        /// Row/column where factorisation broke down
        index: usize,
        /// Offending pivot or residual
        pivot: f64,
    },
    /// Matrix dimensions are invalid.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },
    /// Diagonal elements are not 1.0.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },
    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row
        i: usize,
        /// Column
        j: usize,
    },
    /// Correlation value out of range [-1, 1].
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row
        i: usize,
        /// Column
        j: usize,
        /// Offending value
        value: f64,
    },
}

impl From<CorrelationError> for PricingError {
    fn from(err: CorrelationError) -> Self {
        match err {
            CorrelationError::InvalidDimensions { expected, got } => {
                PricingError::DimensionMismatch {
                    name: "correlation",
                    expected,
                    got,
                }
            }
            other => PricingError::InvalidCovariance(other.to_string()),
        }
    }
}

/// Correlation matrix with validation.
///
/// A correlation matrix must satisfy:
/// - Square and symmetric
/// - Diagonal elements equal to 1.0
/// - Off-diagonal elements in [-1, 1]
///
/// Positive semi-definiteness is only checked when a covariance built from
/// it is factorised.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order
    data: Vec<f64>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl CorrelationMatrix {
    /// Create a new correlation matrix from a flat row-major slice.
    ///
    /// # Errors
    ///
    /// `CorrelationError` if the element count, diagonal, symmetry or range
    /// checks fail.
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !diag.is_finite() || (diag - 1.0).abs() > ENTRY_TOLERANCE {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij,
                    });
                }
                if (val_ij - val_ji).abs() > ENTRY_TOLERANCE {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Create a correlation matrix from nested rows.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` for ragged rows, otherwise as [`CorrelationMatrix::new`].
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, CorrelationError> {
        let dim = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != dim) {
            return Err(CorrelationError::InvalidDimensions {
                expected: dim * dim,
                got: dim * (dim - 1) + bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(&flat, dim)
    }

    /// Two-asset matrix with off-diagonal `rho`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `|rho| > 1`.
    pub fn pair(rho: f64) -> Result<Self, CorrelationError> {
        Self::new(&[1.0, rho, rho, 1.0], 2)
    }

    /// Create an identity correlation matrix (no correlation).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Builds Σ = diag(vol)·Corr·diag(vol).
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if `vols.len()` differs from the matrix dimension.
    pub fn covariance(&self, vols: &[f64]) -> Result<CovarianceMatrix, CorrelationError> {
        if vols.len() != self.dim {
            return Err(CorrelationError::InvalidDimensions {
                expected: self.dim * self.dim,
                got: vols.len() * vols.len(),
            });
        }
        let n = self.dim;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = vols[i] * self.get(i, j) * vols[j];
            }
        }
        Ok(CovarianceMatrix { data, dim: n })
    }
}

/// Covariance matrix Σ (row-major).
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CovarianceMatrix {
    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Compute the lower-triangular factor L with Σ = L·Lᵀ.
    ///
    /// Zero pivots (relative to the largest diagonal entry) produce zero
    /// columns instead of failing, so rank-deficient PSD matrices factorise.
    ///
    /// # Errors
    ///
    /// `NotPositiveSemiDefinite` on a negative pivot, or on a non-zero
    /// residual in a column whose pivot vanished.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let scale = (0..n).map(|i| self.get(i, i)).fold(0.0_f64, f64::max);
        let tol = PIVOT_TOLERANCE * scale.max(f64::MIN_POSITIVE);
        let mut lower = vec![0.0; n * n];

        for j in 0..n {
            let mut pivot = self.get(j, j);
            for k in 0..j {
                pivot -= lower[j * n + k] * lower[j * n + k];
            }

            if pivot < -tol {
                tracing::warn!(index = j, pivot, "covariance factorisation hit a negative pivot");
                return Err(CorrelationError::NotPositiveSemiDefinite { index: j, pivot });
            }

            if pivot <= tol {
                // Degenerate direction: the rest of column j must vanish too.
                for i in (j + 1)..n {
                    let mut residual = self.get(i, j);
                    for k in 0..j {
                        residual -= lower[i * n + k] * lower[j * n + k];
                    }
                    if residual.abs() > tol.sqrt() * scale.sqrt() {
                        tracing::warn!(
                            index = i,
                            residual,
                            "covariance factorisation found residual against zero pivot"
                        );
                        return Err(CorrelationError::NotPositiveSemiDefinite {
                            index: i,
                            pivot: residual,
                        });
                    }
                }
                continue;
            }

            let l_jj = pivot.sqrt();
            lower[j * n + j] = l_jj;
            for i in (j + 1)..n {
                let mut sum = self.get(i, j);
                for k in 0..j {
                    sum -= lower[i * n + k] * lower[j * n + k];
                }
                lower[i * n + j] = sum / l_jj;
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor.
///
/// Used to transform independent standard normals into correlated normals.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular matrix elements (row-major)
    data: Vec<f64>,
    /// Matrix dimension
    dim: usize,
}

impl CholeskyFactor {
    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Returns `L z`.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() != self.dim()`.
    pub fn transform(&self, z: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        self.transform_into(z, &mut out);
        out
    }

    /// Writes `L z` into `out` without allocating.
    ///
    /// # Panics
    ///
    /// Panics if either slice length differs from `self.dim()`.
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        assert_eq!(z.len(), self.dim, "input dimension mismatch");
        assert_eq!(out.len(), self.dim, "output dimension mismatch");
        let n = self.dim;
        for i in 0..n {
            let row = &self.data[i * n..i * n + i + 1];
            out[i] = row.iter().zip(z).map(|(l, x)| l * x).sum();
        }
    }
}
