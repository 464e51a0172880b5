//! Basket Monte Carlo over a single shared increment batch.
//!
//! Every path re-applies the same [`SimulationIncrements`], so all paths
//! are identical and the result does not depend on the path count. The
//! payoff is applied once, to the basket value averaged across paths,
//! rather than averaged per path.
//!
//! The Euler step multiplies the increment by the asset volatility even
//! though the increment already carries it through Σ, so the effective
//! diffusion is `vol²`. Both conventions are kept as observable behaviour.

use pricer_core::types::PricingError;
use pricer_models::instruments::{ContractSpec, Underlying};
use pricer_models::models::CorrelationMatrix;

use super::config::MonteCarloConfig;
use super::sampler::{CorrelatedIncrementSampler, SimulationIncrements};
use super::{evaluate_paths, running_mean, McOutcome};
use crate::valuation::History;

/// Per-asset drifts and basket weights.
///
/// Weights are arbitrary reals and need not sum to one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasketSpec {
    /// Expected return μ per asset.
    pub drifts: Vec<f64>,
    /// Basket weight per asset.
    pub weights: Vec<f64>,
}

impl BasketSpec {
    /// Creates a basket spec.
    pub fn new(drifts: Vec<f64>, weights: Vec<f64>) -> Self {
        Self { drifts, weights }
    }

    /// Checks both vectors have one entry per asset.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` naming the offending vector.
    pub fn validate(&self, n_assets: usize) -> Result<(), PricingError> {
        PricingError::require_len("drifts", n_assets, self.drifts.len())?;
        PricingError::require_len("weights", n_assets, self.weights.len())?;
        Ok(())
    }
}

/// Shared-increment basket engine.
#[derive(Debug)]
pub struct BasketEngine<'a> {
    underlyings: &'a [Underlying],
    spec: &'a BasketSpec,
    sampler: CorrelatedIncrementSampler,
}

impl<'a> BasketEngine<'a> {
    /// Validates inputs and factorises the covariance.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the asset count, correlation dimension,
    ///   drifts and weights disagree
    /// - `NonPositiveInput` for a bad spot or volatility
    /// - `InvalidCovariance` if Σ is not positive semi-definite
    pub fn new(
        underlyings: &'a [Underlying],
        corr: &CorrelationMatrix,
        spec: &'a BasketSpec,
        seed: u64,
    ) -> Result<Self, PricingError> {
        if underlyings.is_empty() {
            return Err(PricingError::DimensionMismatch {
                name: "underlyings",
                expected: corr.dim(),
                got: 0,
            });
        }
        for u in underlyings {
            u.validate()?;
        }
        spec.validate(underlyings.len())?;

        let vols: Vec<f64> = underlyings.iter().map(|u| u.vol).collect();
        let sampler = CorrelatedIncrementSampler::new(&vols, corr, seed)?;
        Ok(Self {
            underlyings,
            spec,
            sampler,
        })
    }

    /// Runs the simulation and prices the contract.
    ///
    /// The strike defaults to the first asset's spot. `std_error` is never
    /// reported since every path is identical.
    ///
    /// # Errors
    ///
    /// - `NonPositiveInput` for a bad maturity, rate or strike
    /// - `Cancelled` if the token fires between paths
    #[tracing::instrument(skip_all, fields(n_assets = self.underlyings.len(), n_paths = config.n_paths()))]
    pub fn run(
        &self,
        contract: &ContractSpec,
        config: &MonteCarloConfig,
    ) -> Result<McOutcome, PricingError> {
        contract.validate()?;
        let strike = contract.strike_or(self.underlyings[0].spot);
        let dt = contract.maturity / config.n_steps() as f64;

        let increments = self.sampler.sample(config.n_steps());
        let terminals = evaluate_paths(config, |_| self.terminal_basket(&increments, dt))?;

        let average = running_mean(&terminals);
        let price = contract.right.intrinsic(average, strike) * contract.discount_factor();
        tracing::debug!(average, strike, price, "basket valued");

        Ok(McOutcome {
            price,
            std_error: None,
            history: config
                .keep_history()
                .then(|| History::SharedIncrements(increments)),
        })
    }

    /// Weighted terminal value of one path driven by `increments`.
    fn terminal_basket(&self, increments: &SimulationIncrements, dt: f64) -> f64 {
        let sqrt_dt = dt.sqrt();
        let mut prices: Vec<f64> = self.underlyings.iter().map(|u| u.spot).collect();

        for z in increments.iter() {
            for (i, s) in prices.iter_mut().enumerate() {
                let vol = self.underlyings[i].vol;
                *s += self.spec.drifts[i] * *s * dt + vol * *s * z[i] * sqrt_dt;
            }
        }

        self.spec
            .weights
            .iter()
            .zip(&prices)
            .map(|(w, s)| w * s)
            .sum()
    }
}
