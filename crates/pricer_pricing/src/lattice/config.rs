//! Lattice valuation configuration.

use crate::cancel::CancelToken;
use crate::mc::config::MAX_STEPS;
use crate::mc::error::ConfigError;

/// Lattice valuation configuration.
///
/// Immutable; construct with [`LatticeConfig::builder`]. Early exercise is
/// normally a property of the contract; `early_exercise` overrides it.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeConfig;
///
/// let config = LatticeConfig::builder().n_steps(500).build().unwrap();
/// assert_eq!(config.n_steps(), 500);
/// assert!(!config.keep_history());
/// ```
#[derive(Clone, Debug)]
pub struct LatticeConfig {
    n_steps: usize,
    keep_history: bool,
    early_exercise: Option<bool>,
    cancel: Option<CancelToken>,
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Number of time steps n.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Whether every (S, O) layer is retained in the result.
    #[inline]
    pub fn keep_history(&self) -> bool {
        self.keep_history
    }

    /// Explicit early-exercise override, if any.
    #[inline]
    pub fn early_exercise(&self) -> Option<bool> {
        self.early_exercise
    }

    /// Cancellation token, if any.
    #[inline]
    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidStepCount` if `n_steps` is 0 or above 10,000.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    n_steps: Option<usize>,
    keep_history: bool,
    early_exercise: Option<bool>,
    cancel: Option<CancelToken>,
}

impl LatticeConfigBuilder {
    /// Sets the number of time steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Retains the full reference and option trees when set.
    #[inline]
    pub fn keep_history(mut self, keep_history: bool) -> Self {
        self.keep_history = keep_history;
        self
    }

    /// Forces early exercise on or off regardless of the contract style.
    #[inline]
    pub fn early_exercise(mut self, early_exercise: bool) -> Self {
        self.early_exercise = Some(early_exercise);
        self
    }

    /// Attaches a cancellation token polled once per layer.
    #[inline]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError` if `n_steps` is missing or out of range.
    pub fn build(self) -> Result<LatticeConfig, ConfigError> {
        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = LatticeConfig {
            n_steps,
            keep_history: self.keep_history,
            early_exercise: self.early_exercise,
            cancel: self.cancel,
        };
        config.validate()?;
        Ok(config)
    }
}
