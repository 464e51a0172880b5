//! Products priced directly on the lattice engine.
//!
//! - **Boston option**: American option whose premium is paid at expiry,
//!   so the lattice value is grossed up by `exp(r T)`
//! - **Low exercise price option (LEPO)**: European call with a nominal
//!   strike of 0.01

use pricer_core::types::PricingError;
use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight, Underlying};

use crate::lattice::LatticeConfig;
use crate::valuation::{price_via_lattice, ValuationResult};

/// Strike of a low exercise price option.
pub const LEPO_STRIKE: f64 = 0.01;

/// Values a Boston option: the American lattice value times `exp(r T)`.
///
/// The contract's exercise style is forced to American; an explicit
/// early-exercise override in `config` still applies.
///
/// # Errors
///
/// As [`price_via_lattice`].
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{ContractSpec, OptionRight, Underlying};
/// use pricer_pricing::lattice::LatticeConfig;
/// use pricer_pricing::products::price_boston;
///
/// let put = ContractSpec::new(OptionRight::Put, 52.0, 2.0, 0.05);
/// let config = LatticeConfig::builder().n_steps(2).build().unwrap();
/// let result = price_boston(&Underlying::new(50.0, 0.3), &put, &config).unwrap();
/// assert!((result.price - 8.209653750647185).abs() < 1e-10);
/// ```
pub fn price_boston(
    underlying: &Underlying,
    contract: &ContractSpec,
    config: &LatticeConfig,
) -> Result<ValuationResult, PricingError> {
    let american = contract.with_exercise(ExerciseStyle::American);
    let mut result = price_via_lattice(underlying, &american, config)?;
    result.price /= american.discount_factor();
    result.sub_method = "binomial tree, premium paid at expiry; Hull Ch.13";
    Ok(result)
}

/// Values a LEPO on `underlying` maturing at `maturity`.
///
/// Without history the price comes from the direct terminal sum; with
/// history the full induction runs and both trees are returned.
///
/// # Errors
///
/// As [`price_via_lattice`].
pub fn price_low_exercise_price(
    underlying: &Underlying,
    maturity: f64,
    rate: f64,
    config: &LatticeConfig,
) -> Result<ValuationResult, PricingError> {
    let contract = ContractSpec::new(OptionRight::Call, LEPO_STRIKE, maturity, rate);
    let mut result = price_via_lattice(underlying, &contract, config)?;
    result.sub_method = "binomial tree, strike 0.01; Hull Ch.13";
    Ok(result)
}
