//! Valuation entry points and results.
//!
//! ## Design Philosophy
//!
//! - **Explicit method selection**: callers pick a [`PricingMethod`] by
//!   constructing a [`Pricer`] variant; nothing is looked up by name
//! - **Static dispatch**: [`Pricer`] forwards via `match`, no trait objects
//! - **Read-only inputs**: underlyings and contracts are borrowed and never
//!   mutated; every call is independent of every other
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight, Underlying};
//! use pricer_pricing::lattice::LatticeConfig;
//! use pricer_pricing::valuation::{price_via_lattice, History};
//!
//! let stock = Underlying::new(50.0, 0.3);
//! let put = ContractSpec::new(OptionRight::Put, 52.0, 2.0, 0.05)
//!     .with_exercise(ExerciseStyle::American);
//! let config = LatticeConfig::builder().n_steps(2).keep_history(true).build().unwrap();
//!
//! let result = price_via_lattice(&stock, &put, &config).unwrap();
//! assert!((result.price - 7.42840190270483).abs() < 1e-10);
//! assert!(matches!(result.history, Some(History::Lattice { .. })));
//! ```

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;
use pricer_models::instruments::{ContractSpec, Underlying};
use pricer_models::models::CorrelationMatrix;

use crate::lattice::{LatticeConfig, LatticeEngine, LatticeParameters, PriceTree};
use crate::mc::{BasketEngine, BasketSpec, MonteCarloConfig, SimulationIncrements, SimulationPath, SpreadEngine};

/// Valuation method tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PricingMethod {
    /// Binomial lattice.
    Lattice,
    /// Monte Carlo simulation.
    MonteCarlo,
}

impl PricingMethod {
    /// Short code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            PricingMethod::Lattice => "LT",
            PricingMethod::MonteCarlo => "MC",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lt" | "lattice" => Ok(PricingMethod::Lattice),
            "mc" | "monte_carlo" | "montecarlo" => Ok(PricingMethod::MonteCarlo),
            other => Err(PricingError::InvalidConfig(format!(
                "unsupported pricing method '{}': expected lattice or monte_carlo",
                other
            ))),
        }
    }
}

/// Monte Carlo aggregation variant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum McVariant {
    /// N-asset basket, one shared increment batch, payoff of the averaged
    /// terminal basket value.
    Basket(BasketSpec),
    /// Two-asset spread, independent increments per path, mean of payoffs.
    Spread,
}

impl McVariant {
    fn sub_method(&self) -> &'static str {
        match self {
            McVariant::Basket(_) => "shared increments; payoff of average",
            McVariant::Spread => "independent increments; average of payoffs",
        }
    }
}

/// Retained simulation or lattice state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum History {
    /// Underlying and option value trees.
    Lattice {
        /// Underlying prices per layer.
        ref_tree: PriceTree,
        /// Option values per layer.
        opt_tree: PriceTree,
    },
    /// The single increment batch every basket path re-applies.
    SharedIncrements(SimulationIncrements),
    /// Every simulated spread path.
    Paths(Vec<SimulationPath>),
}

/// Complete result of one valuation.
///
/// Either a fully populated result is returned or an error; there are no
/// partial results.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuationResult {
    /// Present value.
    pub price: f64,
    /// Standard error of the estimate (independent-path Monte Carlo only).
    pub std_error: Option<f64>,
    /// Method used.
    pub method: PricingMethod,
    /// Free-form description of the variant used.
    pub sub_method: &'static str,
    /// Lattice parameters (lattice only).
    pub lattice_params: Option<LatticeParameters>,
    /// Retained history, when requested.
    pub history: Option<History>,
    /// Number of time steps.
    pub n_steps: usize,
    /// Number of paths (Monte Carlo only).
    pub n_paths: Option<usize>,
}

/// Common interface over the valuation methods.
pub trait PricingEngine {
    /// Method implemented by this engine.
    fn method(&self) -> PricingMethod;

    /// Values `contract` on `underlyings`.
    ///
    /// # Errors
    ///
    /// Any [`PricingError`] raised by validation or the engine.
    fn price(
        &self,
        underlyings: &[Underlying],
        contract: &ContractSpec,
    ) -> Result<ValuationResult, PricingError>;
}

/// Lattice pricer for a single underlying.
#[derive(Clone, Debug)]
pub struct LatticePricer {
    config: LatticeConfig,
}

impl LatticePricer {
    /// Creates a lattice pricer.
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// The lattice configuration.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }
}

impl PricingEngine for LatticePricer {
    fn method(&self) -> PricingMethod {
        PricingMethod::Lattice
    }

    fn price(
        &self,
        underlyings: &[Underlying],
        contract: &ContractSpec,
    ) -> Result<ValuationResult, PricingError> {
        let [underlying] = underlyings else {
            return Err(PricingError::DimensionMismatch {
                name: "underlyings",
                expected: 1,
                got: underlyings.len(),
            });
        };
        price_via_lattice(underlying, contract, &self.config)
    }
}

/// Monte Carlo pricer for baskets and spreads.
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    correlation: CorrelationMatrix,
    variant: McVariant,
}

impl MonteCarloPricer {
    /// Creates a Monte Carlo pricer.
    pub fn new(config: MonteCarloConfig, correlation: CorrelationMatrix, variant: McVariant) -> Self {
        Self {
            config,
            correlation,
            variant,
        }
    }

    /// The simulation configuration.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// The aggregation variant.
    pub fn variant(&self) -> &McVariant {
        &self.variant
    }
}

impl PricingEngine for MonteCarloPricer {
    fn method(&self) -> PricingMethod {
        PricingMethod::MonteCarlo
    }

    fn price(
        &self,
        underlyings: &[Underlying],
        contract: &ContractSpec,
    ) -> Result<ValuationResult, PricingError> {
        price_via_monte_carlo(underlyings, contract, &self.correlation, &self.variant, &self.config)
    }
}

/// Static dispatch over the available pricers.
#[derive(Clone, Debug)]
pub enum Pricer {
    /// Binomial lattice.
    Lattice(LatticePricer),
    /// Monte Carlo simulation.
    MonteCarlo(MonteCarloPricer),
}

impl PricingEngine for Pricer {
    fn method(&self) -> PricingMethod {
        match self {
            Pricer::Lattice(p) => p.method(),
            Pricer::MonteCarlo(p) => p.method(),
        }
    }

    fn price(
        &self,
        underlyings: &[Underlying],
        contract: &ContractSpec,
    ) -> Result<ValuationResult, PricingError> {
        match self {
            Pricer::Lattice(p) => p.price(underlyings, contract),
            Pricer::MonteCarlo(p) => p.price(underlyings, contract),
        }
    }
}

/// Values a single-underlying contract on a CRR lattice.
///
/// Early exercise follows the contract's [`ExerciseStyle`] unless the
/// config overrides it. A missing strike defaults to the spot.
///
/// [`ExerciseStyle`]: pricer_models::instruments::ExerciseStyle
///
/// # Errors
///
/// - `NonPositiveInput` for a bad spot, volatility, maturity, rate or strike
/// - `InvalidLatticeParameters` if the derived probability is outside [0, 1]
/// - `Cancelled` if the config's token fires
#[tracing::instrument(skip_all, fields(n_steps = config.n_steps()))]
pub fn price_via_lattice(
    underlying: &Underlying,
    contract: &ContractSpec,
    config: &LatticeConfig,
) -> Result<ValuationResult, PricingError> {
    underlying.validate()?;
    contract.validate()?;
    config.validate()?;

    let early_exercise = config
        .early_exercise()
        .unwrap_or_else(|| contract.exercise.allows_early_exercise());
    let strike = contract.strike_or(underlying.spot);

    let params = LatticeParameters::build(
        underlying.vol,
        contract.rate,
        underlying.div_yield,
        contract.maturity,
        config.n_steps(),
    )?;
    let outcome = LatticeEngine::new(&params).run(
        underlying.spot,
        strike,
        contract.right,
        early_exercise,
        config,
    )?;

    let history = match (outcome.ref_tree, outcome.opt_tree) {
        (Some(ref_tree), Some(opt_tree)) => Some(History::Lattice { ref_tree, opt_tree }),
        _ => None,
    };

    Ok(ValuationResult {
        price: outcome.value,
        std_error: None,
        method: PricingMethod::Lattice,
        sub_method: "binomial tree; Hull Ch.13",
        lattice_params: Some(params),
        history,
        n_steps: config.n_steps(),
        n_paths: None,
    })
}

/// Values a multi-asset contract by Monte Carlo simulation.
///
/// # Errors
///
/// - `DimensionMismatch` for inconsistent asset counts
/// - `NonPositiveInput` for a bad spot, volatility, maturity, rate or strike
/// - `InvalidCovariance` for an infeasible correlation structure
/// - `Cancelled` if the config's token fires
#[tracing::instrument(skip_all, fields(n_assets = underlyings.len(), n_paths = config.n_paths()))]
pub fn price_via_monte_carlo(
    underlyings: &[Underlying],
    contract: &ContractSpec,
    correlation: &CorrelationMatrix,
    variant: &McVariant,
    config: &MonteCarloConfig,
) -> Result<ValuationResult, PricingError> {
    config.validate()?;

    let outcome = match variant {
        McVariant::Basket(spec) => {
            BasketEngine::new(underlyings, correlation, spec, config.seed())?.run(contract, config)?
        }
        McVariant::Spread => SpreadEngine::new(underlyings, correlation)?.run(contract, config)?,
    };

    Ok(ValuationResult {
        price: outcome.price,
        std_error: outcome.std_error,
        method: PricingMethod::MonteCarlo,
        sub_method: variant.sub_method(),
        lattice_params: None,
        history: outcome.history,
        n_steps: config.n_steps(),
        n_paths: Some(config.n_paths()),
    })
}
