//! Backward-induction engine.

use pricer_core::math::combinatorics::binomial_log_weights;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionRight;

use super::config::LatticeConfig;
use super::params::LatticeParameters;
use super::tree::PriceTree;
use crate::cancel;

/// Result of a single lattice run.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeOutcome {
    /// Present value at the root.
    pub value: f64,
    /// Underlying prices per layer, when history was requested.
    pub ref_tree: Option<PriceTree>,
    /// Option values per layer, when history was requested.
    pub opt_tree: Option<PriceTree>,
}

/// Binomial lattice engine over pre-derived [`LatticeParameters`].
///
/// The engine is stateless beyond the parameters it borrows; a single
/// instance can run any number of contracts sharing the same lattice.
#[derive(Clone, Copy, Debug)]
pub struct LatticeEngine<'a> {
    params: &'a LatticeParameters,
}

impl<'a> LatticeEngine<'a> {
    /// Creates an engine over the given parameters.
    #[inline]
    pub fn new(params: &'a LatticeParameters) -> Self {
        Self { params }
    }

    /// Values a vanilla payoff on the lattice.
    ///
    /// European contracts without history are summed directly over the
    /// terminal layer in log-space. Every other combination runs backward
    /// induction, checking `max(continuation, intrinsic)` at each node when
    /// `early_exercise` is set.
    ///
    /// # Arguments
    ///
    /// * `spot` - S0 at the root
    /// * `strike` - K
    /// * `right` - call or put
    /// * `early_exercise` - apply the American exercise check at every node
    /// * `config` - step count (must match the parameters), history and cancellation
    ///
    /// # Errors
    ///
    /// - `NonPositiveInput` for a non-positive spot or negative strike
    /// - `InvalidConfig` if `config.n_steps()` differs from the parameters
    /// - `Cancelled` if the token fires between layers
    #[tracing::instrument(skip_all, fields(n_steps = self.params.n_steps, early_exercise = early_exercise))]
    pub fn run(
        &self,
        spot: f64,
        strike: f64,
        right: OptionRight,
        early_exercise: bool,
        config: &LatticeConfig,
    ) -> Result<LatticeOutcome, PricingError> {
        PricingError::require_positive("spot", spot)?;
        PricingError::require_non_negative("strike", strike)?;
        if config.n_steps() != self.params.n_steps {
            return Err(PricingError::InvalidConfig(format!(
                "lattice built for {} steps, config asks for {}",
                self.params.n_steps,
                config.n_steps()
            )));
        }
        cancel::check(config.cancel_token())?;

        if !early_exercise && !config.keep_history() {
            return Ok(LatticeOutcome {
                value: self.direct_sum(spot, strike, right),
                ref_tree: None,
                opt_tree: None,
            });
        }
        self.backward_induction(spot, strike, right, early_exercise, config)
    }

    /// Underlying prices at maturity, `S0 d^(n-i) u^i` for i in 0..=n.
    pub fn terminal_prices(&self, spot: f64) -> Vec<f64> {
        let n = self.params.n_steps;
        (0..=n)
            .map(|i| spot * self.params.d.powi((n - i) as i32) * self.params.u.powi(i as i32))
            .collect()
    }

    fn direct_sum(&self, spot: f64, strike: f64, right: OptionRight) -> f64 {
        let weights = binomial_log_weights(self.params.n_steps, self.params.p);
        let expected: f64 = self
            .terminal_prices(spot)
            .into_iter()
            .zip(weights)
            .map(|(s, w)| w.exp() * right.intrinsic(s, strike))
            .sum();
        tracing::debug!(expected, "direct terminal sum");
        self.params.df_t * expected
    }

    fn backward_induction(
        &self,
        spot: f64,
        strike: f64,
        right: OptionRight,
        early_exercise: bool,
        config: &LatticeConfig,
    ) -> Result<LatticeOutcome, PricingError> {
        let LatticeParameters { d, p, df_dt, .. } = *self.params;
        let n = self.params.n_steps;
        let keep = config.keep_history();

        let mut s = self.terminal_prices(spot);
        let mut o: Vec<f64> = s.iter().map(|&x| right.intrinsic(x, strike)).collect();

        let mut s_layers = Vec::new();
        let mut o_layers = Vec::new();
        if keep {
            s_layers.reserve(n + 1);
            o_layers.reserve(n + 1);
            s_layers.push(s.clone());
            o_layers.push(o.clone());
        }

        for step in (1..=n).rev() {
            cancel::check(config.cancel_token())?;
            for j in 0..step {
                o[j] = df_dt * ((1.0 - p) * o[j] + p * o[j + 1]);
                s[j] = d * s[j + 1];
                if early_exercise {
                    o[j] = o[j].max(right.intrinsic(s[j], strike));
                }
            }
            s.truncate(step);
            o.truncate(step);
            tracing::trace!(step, "lattice layer rolled back");

            if keep {
                s_layers.push(s.clone());
                o_layers.push(o.clone());
            }
        }

        let value = o[0];
        let (ref_tree, opt_tree) = if keep {
            s_layers.reverse();
            o_layers.reverse();
            (
                Some(PriceTree::from_layers(s_layers)),
                Some(PriceTree::from_layers(o_layers)),
            )
        } else {
            (None, None)
        };

        Ok(LatticeOutcome {
            value,
            ref_tree,
            opt_tree,
        })
    }
}
