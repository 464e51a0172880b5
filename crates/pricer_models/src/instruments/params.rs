//! Underlying asset parameters.

use pricer_core::types::PricingError;

/// Market description of one underlying asset.
///
/// Immutable for the life of a valuation. Fields are public; engines call
/// [`Underlying::validate`] at their boundary rather than trusting the
/// constructor, so deserialised values are checked the same way.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Underlying;
///
/// let stock = Underlying::new(50.0, 0.3);
/// assert_eq!(stock.div_yield, 0.0);
/// assert!(stock.validate().is_ok());
///
/// let bad = Underlying::new(-1.0, 0.3);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Underlying {
    /// Spot price S0 (must be positive).
    pub spot: f64,
    /// Annualised volatility (non-negative).
    pub vol: f64,
    /// Continuous dividend yield q (non-negative).
    #[cfg_attr(feature = "serde", serde(default))]
    pub div_yield: f64,
}

impl Underlying {
    /// Creates an underlying with zero dividend yield.
    #[inline]
    pub fn new(spot: f64, vol: f64) -> Self {
        Self {
            spot,
            vol,
            div_yield: 0.0,
        }
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn with_div_yield(mut self, div_yield: f64) -> Self {
        self.div_yield = div_yield;
        self
    }

    /// Checks spot > 0, vol >= 0 and q >= 0.
    ///
    /// # Errors
    ///
    /// `PricingError::NonPositiveInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        PricingError::require_positive("spot", self.spot)?;
        PricingError::require_non_negative("vol", self.vol)?;
        PricingError::require_non_negative("div_yield", self.div_yield)?;
        Ok(())
    }
}
