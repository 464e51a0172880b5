//! Option right and intrinsic payoff.

use std::str::FromStr;

use pricer_core::types::PricingError;

/// Right conveyed by the option.
///
/// The payoff of a vanilla contract at underlying level `S` is
/// `max(sign * (S - K), 0)` with `sign = +1` for calls and `-1` for puts.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionRight;
///
/// assert_eq!(OptionRight::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionRight::Put.intrinsic(110.0, 100.0), 0.0);
/// assert_eq!(OptionRight::Put.sign(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionRight {
    /// Right to buy: max(S - K, 0)
    Call,
    /// Right to sell: max(K - S, 0)
    Put,
}

impl OptionRight {
    /// Payoff sign: +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionRight::Call => 1.0,
            OptionRight::Put => -1.0,
        }
    }

    /// Immediate exercise value `max(sign * (spot - strike), 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl FromStr for OptionRight {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionRight::Call),
            "put" | "p" => Ok(OptionRight::Put),
            other => Err(PricingError::InvalidConfig(format!(
                "unknown option right '{}': expected call or put",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionRight::Call => write!(f, "call"),
            OptionRight::Put => write!(f, "put"),
        }
    }
}
