//! Contract specification shared by the lattice and Monte Carlo engines.

use pricer_core::types::PricingError;

use super::exercise::ExerciseStyle;
use super::payoff::OptionRight;

/// Static terms of an option contract plus the risk-free rate it is
/// discounted at.
///
/// The strike is optional: strike-less contracts (e.g. at-the-money
/// forward starts) fall back to the spot of the reference underlying via
/// [`ContractSpec::strike_or`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight};
///
/// let put = ContractSpec::new(OptionRight::Put, 52.0, 2.0, 0.05)
///     .with_exercise(ExerciseStyle::American);
/// assert_eq!(put.sign(), -1.0);
/// assert_eq!(put.strike_or(50.0), 52.0);
///
/// let atm = ContractSpec::strikeless(OptionRight::Call, 1.0, 0.05);
/// assert_eq!(atm.strike_or(50.0), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractSpec {
    /// Call or put.
    pub right: OptionRight,
    /// Strike K; `None` means "use the reference spot".
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike: Option<f64>,
    /// Maturity T in years (must be positive).
    pub maturity: f64,
    /// Continuously compounded risk-free rate r (non-negative).
    pub rate: f64,
    /// Exercise style.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exercise: ExerciseStyle,
}

impl ContractSpec {
    /// Creates a European contract with an explicit strike.
    #[inline]
    pub fn new(right: OptionRight, strike: f64, maturity: f64, rate: f64) -> Self {
        Self {
            right,
            strike: Some(strike),
            maturity,
            rate,
            exercise: ExerciseStyle::European,
        }
    }

    /// Creates a European contract whose strike defaults to the spot.
    #[inline]
    pub fn strikeless(right: OptionRight, maturity: f64, rate: f64) -> Self {
        Self {
            right,
            strike: None,
            maturity,
            rate,
            exercise: ExerciseStyle::European,
        }
    }

    /// Sets the exercise style.
    #[inline]
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Payoff sign of the contract's right.
    #[inline]
    pub fn sign(&self) -> f64 {
        self.right.sign()
    }

    /// The strike, or `spot` for strike-less contracts.
    #[inline]
    pub fn strike_or(&self, spot: f64) -> f64 {
        self.strike.unwrap_or(spot)
    }

    /// Discount factor `exp(-r T)` over the full maturity.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Checks T > 0, r >= 0 and, when present, K >= 0.
    ///
    /// # Errors
    ///
    /// `PricingError::NonPositiveInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        PricingError::require_positive("maturity", self.maturity)?;
        PricingError::require_non_negative("rate", self.rate)?;
        if let Some(strike) = self.strike {
            PricingError::require_non_negative("strike", strike)?;
        }
        Ok(())
    }
}
