//! Valuation request loading.
//!
//! Requests are TOML files. `PRICER_LOG_LEVEL` overrides the file's
//! `log_level`.
//!
//! ```toml
//! log_level = "info"
//! product = "vanilla"
//!
//! [[underlyings]]
//! spot = 50.0
//! vol = 0.3
//!
//! [contract]
//! right = "put"
//! strike = 52.0
//! maturity = 2.0
//! rate = 0.05
//! exercise = "american"
//!
//! [method]
//! kind = "lattice"
//! n_steps = 2
//! keep_history = true
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_models::instruments::{ContractSpec, Underlying};
use pricer_models::models::CorrelationMatrix;
use pricer_pricing::lattice::LatticeConfig;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::valuation::{LatticePricer, MonteCarloPricer};
use pricer_pricing::{McVariant, Pricer};
use serde::Deserialize;

use crate::{CliError, Result};

/// Log levels accepted in requests and `PRICER_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Product priced by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// Plain call or put, European or American per the contract.
    #[default]
    Vanilla,
    /// American option with premium paid at expiry.
    Boston,
    /// Low exercise price option; only maturity and rate of the contract apply.
    Lepo,
}

/// Method section of a request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodRequest {
    Lattice {
        n_steps: usize,
        #[serde(default)]
        keep_history: bool,
        #[serde(default)]
        early_exercise: Option<bool>,
    },
    MonteCarlo {
        n_steps: usize,
        n_paths: usize,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        keep_history: bool,
        #[serde(default)]
        parallel: bool,
        correlation: Vec<Vec<f64>>,
        variant: McVariant,
    },
}

impl MethodRequest {
    /// Lattice settings of a `lattice` method.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a Monte Carlo method or an invalid step count.
    pub fn lattice_config(&self) -> Result<LatticeConfig> {
        let MethodRequest::Lattice {
            n_steps,
            keep_history,
            early_exercise,
        } = self
        else {
            return Err(CliError::InvalidArgument(
                "this product requires kind = \"lattice\"".to_string(),
            ));
        };
        let mut builder = LatticeConfig::builder()
            .n_steps(*n_steps)
            .keep_history(*keep_history);
        if let Some(flag) = early_exercise {
            builder = builder.early_exercise(*flag);
        }
        builder
            .build()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))
    }

    /// Builds the configured pricer.
    pub fn to_pricer(&self) -> Result<Pricer> {
        match self {
            MethodRequest::Lattice { .. } => {
                Ok(Pricer::Lattice(LatticePricer::new(self.lattice_config()?)))
            }
            MethodRequest::MonteCarlo {
                n_steps,
                n_paths,
                seed,
                keep_history,
                parallel,
                correlation,
                variant,
            } => {
                let mut builder = MonteCarloConfig::builder()
                    .n_steps(*n_steps)
                    .n_paths(*n_paths)
                    .keep_history(*keep_history)
                    .parallel(*parallel);
                if let Some(seed) = seed {
                    builder = builder.seed(*seed);
                }
                let config = builder
                    .build()
                    .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
                let corr = CorrelationMatrix::from_rows(correlation)?;
                Ok(Pricer::MonteCarlo(MonteCarloPricer::new(
                    config,
                    corr,
                    variant.clone(),
                )))
            }
        }
    }
}

/// A complete valuation request.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationRequest {
    #[serde(default, deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    #[serde(default)]
    pub product: Product,
    pub underlyings: Vec<Underlying>,
    pub contract: ContractSpec,
    pub method: MethodRequest,
}

impl ValuationRequest {
    /// Parses a request from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a request file and applies environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut request = Self::from_toml_str(&content)?;

        if let Ok(level) = std::env::var("PRICER_LOG_LEVEL") {
            request.log_level = LogLevel::from_str(&level)?;
        }
        Ok(request)
    }
}
