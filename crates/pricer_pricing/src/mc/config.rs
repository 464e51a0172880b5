//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for the basket
//! and spread Monte Carlo engines.

use super::error::ConfigError;
use crate::cancel::CancelToken;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path (shared with the lattice).
pub const MAX_STEPS: usize = 10_000;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 10987;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_SEED};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .parallel(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert_eq!(config.seed(), DEFAULT_SEED);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of time steps per path.
    n_steps: usize,
    /// Seed for the increment sampler and per-path streams.
    seed: u64,
    /// Retain simulated increments or paths in the result.
    keep_history: bool,
    /// Evaluate paths on the rayon pool.
    parallel: bool,
    cancel: Option<CancelToken>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether history is retained.
    #[inline]
    pub fn keep_history(&self) -> bool {
        self.keep_history
    }

    /// Whether paths are evaluated in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
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
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(100)
///     .n_steps(100)
///     .seed(12345)
///     .keep_history(true)
///     .build()
///     .expect("valid config");
/// assert!(config.keep_history());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    keep_history: bool,
    parallel: bool,
    cancel: Option<CancelToken>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    ///
    /// # Arguments
    ///
    /// * `n_paths` - Number of paths in [1, 10_000_000]
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    ///
    /// # Arguments
    ///
    /// * `n_steps` - Number of steps in [1, 10_000]
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Retains the shared increments (basket) or every path (spread).
    #[inline]
    pub fn keep_history(mut self, keep_history: bool) -> Self {
        self.keep_history = keep_history;
        self
    }

    /// Evaluates paths on the rayon thread pool.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Attaches a cancellation token polled once per path.
    #[inline]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` not set or invalid
    /// - `n_steps` not set or invalid
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            n_steps,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            keep_history: self.keep_history,
            parallel: self.parallel,
            cancel: self.cancel,
        };

        config.validate()?;
        Ok(config)
    }
}
