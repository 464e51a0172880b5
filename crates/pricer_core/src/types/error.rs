//! Error types for structured error handling.
//!
//! This module provides [`PricingError`], the single error type returned by
//! the lattice and Monte Carlo valuation entry points. Lower layers define
//! their own narrower errors and convert into it via `From`.

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure is reported synchronously; no partial valuation result is
/// ever produced alongside an error.
///
/// # Variants
/// - `InvalidLatticeParameters`: derived risk-neutral probability outside [0, 1]
/// - `InvalidCovariance`: correlation structure infeasible (|ρ| > 1, not PSD, ...)
/// - `NonPositiveInput`: spot, volatility or maturity not strictly positive
/// - `DimensionMismatch`: per-asset vectors disagree with the asset count
/// - `InvalidConfig`: step or path counts out of range
/// - `Cancelled`: valuation aborted through a cancellation token
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::NonPositiveInput { name: "maturity", value: 0.0 };
/// assert_eq!(format!("{}", err), "Non-positive input: maturity = 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Risk-neutral probability derived from the lattice inputs is outside [0, 1].
    #[error("Invalid lattice parameters: p = {probability} (u = {up}, d = {down}, a = {growth}); try more steps")]
    InvalidLatticeParameters {
        /// Derived risk-neutral probability
        probability: f64,
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
        /// One-step growth factor exp((r - q)dt)
        growth: f64,
    },

    /// Correlation or covariance structure cannot be factorised.
    #[error("Invalid covariance: {0}")]
    InvalidCovariance(String),

    /// A quantity that must be strictly positive was not.
    #[error("Non-positive input: {name} = {value}")]
    NonPositiveInput {
        /// Input name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Vector length does not match the number of assets.
    #[error("Dimension mismatch for {name}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Input name
        name: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Engine configuration out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Valuation was cancelled before completion.
    #[error("Valuation cancelled")]
    Cancelled,
}

impl PricingError {
    /// Returns `Ok(value)` if `value` is finite and strictly positive,
    /// otherwise `NonPositiveInput` naming the field.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// assert_eq!(PricingError::require_positive("spot", 50.0), Ok(50.0));
    /// assert!(PricingError::require_positive("spot", 0.0).is_err());
    /// ```
    #[inline]
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, PricingError> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NonPositiveInput { name, value })
        }
    }

    /// Returns `Ok(value)` if `value` is finite and non-negative.
    ///
    /// Negative values are reported as `NonPositiveInput` as well; the
    /// distinction between "zero allowed" and "zero rejected" lives in the
    /// caller's choice of helper, not in the error kind.
    #[inline]
    pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, PricingError> {
        if value >= 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NonPositiveInput { name, value })
        }
    }

    /// Returns `Ok(())` if `got == expected`, otherwise `DimensionMismatch`.
    #[inline]
    pub fn require_len(name: &'static str, expected: usize, got: usize) -> Result<(), PricingError> {
        if expected == got {
            Ok(())
        } else {
            Err(PricingError::DimensionMismatch {
                name,
                expected,
                got,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lattice_parameters_display() {
        let err = PricingError::InvalidLatticeParameters {
            probability: 1.5,
            up: 1.01,
            down: 0.99,
            growth: 1.65,
        };
        let msg = err.to_string();
        assert!(msg.contains("p = 1.5"));
        assert!(msg.contains("try more steps"));
    }

    #[test]
    fn test_invalid_covariance_display() {
        let err = PricingError::InvalidCovariance("not positive semi-definite".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid covariance: not positive semi-definite"
        );
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = PricingError::DimensionMismatch {
            name: "weights",
            expected: 3,
            got: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Dimension mismatch for weights: expected 3, got 2"
        );
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(PricingError::Cancelled.to_string(), "Valuation cancelled");
    }

    #[test]
    fn test_require_positive() {
        assert!(PricingError::require_positive("vol", 0.2).is_ok());
        assert!(PricingError::require_positive("vol", 0.0).is_err());
        assert!(PricingError::require_positive("vol", -0.2).is_err());
        assert!(PricingError::require_positive("vol", f64::NAN).is_err());
        assert!(PricingError::require_positive("vol", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(PricingError::require_non_negative("rate", 0.0).is_ok());
        assert!(matches!(
            PricingError::require_non_negative("rate", -0.01),
            Err(PricingError::NonPositiveInput { name: "rate", .. })
        ));
    }

    #[test]
    fn test_require_len() {
        assert!(PricingError::require_len("mu", 3, 3).is_ok());
        assert!(matches!(
            PricingError::require_len("mu", 3, 2),
            Err(PricingError::DimensionMismatch {
                expected: 3,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::Cancelled;
        let _: &dyn std::error::Error = &err;
    }
}
