//! Two-asset spread Monte Carlo with independent increments per path.
//!
//! Each path draws its own correlated pair sequence from a stream derived
//! from `(seed, path_index)`, evolves both legs with the risk-neutral drift
//! `r - q`, and discounts `max(sign (S2 - S1 - K), 0)`. The price is the
//! mean of the per-path payoffs.

use pricer_core::types::PricingError;
use pricer_models::instruments::{ContractSpec, Underlying};
use pricer_models::models::CorrelationMatrix;

use super::config::MonteCarloConfig;
use super::paths::SimulationPath;
use super::{evaluate_paths, mean_and_stderr, McOutcome};
use crate::rng::PricerRng;
use crate::valuation::History;

/// Spread engine over a pair of underlyings.
#[derive(Clone, Copy, Debug)]
pub struct SpreadEngine<'a> {
    first: &'a Underlying,
    second: &'a Underlying,
    rho: f64,
}

impl<'a> SpreadEngine<'a> {
    /// Validates the pair and extracts ρ from the correlation matrix.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` unless there are exactly two underlyings and a
    ///   2×2 correlation matrix
    /// - `NonPositiveInput` for a bad spot or volatility
    pub fn new(underlyings: &'a [Underlying], corr: &CorrelationMatrix) -> Result<Self, PricingError> {
        let [first, second] = underlyings else {
            return Err(PricingError::DimensionMismatch {
                name: "underlyings",
                expected: 2,
                got: underlyings.len(),
            });
        };
        PricingError::require_len("correlation", 2, corr.dim())?;
        first.validate()?;
        second.validate()?;

        Ok(Self {
            first,
            second,
            rho: corr.get(0, 1),
        })
    }

    /// Correlation between the two legs.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Simulates `n_paths` independent paths and averages the payoffs.
    ///
    /// A missing strike is treated as zero (an exchange option).
    ///
    /// # Errors
    ///
    /// - `NonPositiveInput` for a bad maturity, rate or strike
    /// - `Cancelled` if the token fires between paths
    #[tracing::instrument(skip_all, fields(rho = self.rho, n_paths = config.n_paths()))]
    pub fn run(
        &self,
        contract: &ContractSpec,
        config: &MonteCarloConfig,
    ) -> Result<McOutcome, PricingError> {
        contract.validate()?;
        let strike = contract.strike.unwrap_or(0.0);
        let df = contract.discount_factor();
        let keep = config.keep_history();

        let results = evaluate_paths(config, |idx| {
            let mut rng = PricerRng::for_stream(config.seed(), idx as u64);
            let (s1, s2, path) = self.simulate(&mut rng, contract, config.n_steps(), keep);
            (contract.right.intrinsic(s2 - s1, strike) * df, path)
        })?;

        let (payoffs, paths): (Vec<f64>, Vec<Option<SimulationPath>>) = results.into_iter().unzip();
        let (price, std_error) = mean_and_stderr(&payoffs);
        tracing::debug!(price, std_error, "spread valued");

        Ok(McOutcome {
            price,
            std_error: Some(std_error),
            history: keep.then(|| History::Paths(paths.into_iter().flatten().collect())),
        })
    }

    /// Evolves both legs over one path; returns terminal prices.
    fn simulate(
        &self,
        rng: &mut PricerRng,
        contract: &ContractSpec,
        n_steps: usize,
        keep: bool,
    ) -> (f64, f64, Option<SimulationPath>) {
        let dt = contract.maturity / n_steps as f64;
        let sqrt_dt = dt.sqrt();
        let complement = (1.0 - self.rho * self.rho).max(0.0).sqrt();

        let mut u = vec![0.0; n_steps];
        let mut v = vec![0.0; n_steps];
        rng.fill_normal(&mut u);
        rng.fill_normal(&mut v);

        let mu_1 = (contract.rate - self.first.div_yield) * dt;
        let mu_2 = (contract.rate - self.second.div_yield) * dt;
        let (mut s1, mut s2) = (self.first.spot, self.second.spot);
        let mut path = keep.then(|| SimulationPath::new(&[s1, s2], n_steps));

        for (zu, zv) in u.iter().zip(&v) {
            let dw_1 = zu * sqrt_dt;
            let dw_2 = (self.rho * zu + complement * zv) * sqrt_dt;
            s1 += s1 * (mu_1 + self.first.vol * dw_1);
            s2 += s2 * (mu_2 + self.second.vol * dw_2);
            if let Some(p) = path.as_mut() {
                p.push(&[s1, s2]);
            }
        }
        (s1, s2, path)
    }
}
