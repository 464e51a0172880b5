//! Monte Carlo valuation engines.
//!
//! # Architecture
//!
//! ```text
//! price_via_monte_carlo
//! ├── MonteCarloConfig            (paths, steps, seed, history, parallel, cancel)
//! ├── BasketEngine                N assets, one shared increment batch
//! │   └── CorrelatedIncrementSampler  Σ = diag(vol) C diag(vol), Cholesky
//! └── SpreadEngine                2 assets, fresh correlated pair per path
//!     └── PricerRng::for_stream   (seed, path index)
//! ```
//!
//! Paths are evaluated either sequentially or on the rayon pool. Results
//! are always collected in path order before aggregation, so both modes
//! produce bit-identical prices.
//!
//! # Example
//!
//! ```rust
//! use pricer_models::instruments::{ContractSpec, OptionRight, Underlying};
//! use pricer_models::models::CorrelationMatrix;
//! use pricer_pricing::mc::{BasketEngine, BasketSpec, MonteCarloConfig};
//!
//! let assets = [Underlying::new(30.0, 0.2), Underlying::new(50.0, 0.15)];
//! let corr = CorrelationMatrix::pair(0.7).unwrap();
//! let spec = BasketSpec::new(vec![0.06, 0.05], vec![0.4, 0.6]);
//!
//! let config = MonteCarloConfig::builder().n_paths(10).n_steps(100).build().unwrap();
//! let engine = BasketEngine::new(&assets, &corr, &spec, config.seed()).unwrap();
//! let put = ContractSpec::new(OptionRight::Put, 55.0, 3.0, 0.05);
//!
//! let outcome = engine.run(&put, &config).unwrap();
//! assert!(outcome.price >= 0.0);
//! ```

pub mod basket;
pub mod config;
pub mod error;
pub mod paths;
pub mod sampler;
pub mod spread;

pub use basket::{BasketEngine, BasketSpec};
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_SEED, MAX_PATHS, MAX_STEPS};
pub use error::ConfigError;
pub use paths::SimulationPath;
pub use sampler::{CorrelatedIncrementSampler, SimulationIncrements};
pub use spread::SpreadEngine;

use pricer_core::types::PricingError;
use rayon::prelude::*;

use crate::cancel;
use crate::valuation::History;

/// Result of one Monte Carlo run.
#[derive(Clone, Debug, PartialEq)]
pub struct McOutcome {
    /// Discounted price.
    pub price: f64,
    /// Standard error of the mean, where meaningful.
    pub std_error: Option<f64>,
    /// Shared increments or per-path history, when requested.
    pub history: Option<History>,
}

/// Evaluates `f` once per path index, in order.
///
/// The cancellation token is polled before each path; the first cancelled
/// path aborts the whole run.
pub(crate) fn evaluate_paths<T, F>(config: &MonteCarloConfig, f: F) -> Result<Vec<T>, PricingError>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let token = config.cancel_token();
    let run = |idx: usize| -> Result<T, PricingError> {
        cancel::check(token)?;
        Ok(f(idx))
    };

    if config.parallel() {
        (0..config.n_paths()).into_par_iter().map(run).collect()
    } else {
        (0..config.n_paths()).map(run).collect()
    }
}

/// Incremental mean; exact when every value is equal.
pub(crate) fn running_mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |mean, (k, &x)| mean + (x - mean) / (k + 1) as f64)
}

/// Sample mean and standard error of the mean (Welford accumulation).
pub(crate) fn mean_and_stderr(values: &[f64]) -> (f64, f64) {
    let mut mean = 0.0_f64;
    let mut m2 = 0.0_f64;
    for (k, &x) in values.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (k + 1) as f64;
        m2 += delta * (x - mean);
    }
    let n = values.len();
    let var = if n > 1 { m2 / (n - 1) as f64 } else { 0.0 };
    (mean, (var / n.max(1) as f64).sqrt())
}
