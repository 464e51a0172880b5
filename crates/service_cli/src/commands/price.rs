//! Price command implementation
//!
//! Prices a loaded valuation request with the lattice or Monte Carlo
//! engine.

use pricer_models::instruments::Underlying;
use pricer_pricing::products::{price_boston, price_low_exercise_price};
use pricer_pricing::{PricingEngine, ValuationResult};
use tracing::info;

use crate::config::{Product, ValuationRequest};
use crate::{CliError, Result};

/// Output formats accepted by `--format`.
const FORMATS: &str = "table, json";

/// Run the price command on an already loaded request
pub fn run(request: &ValuationRequest, format: &str) -> Result<()> {
    if format != "table" && format != "json" {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: {}",
            format, FORMATS
        )));
    }

    let result = evaluate(request)?;
    info!(price = result.price, method = %result.method, "Pricing complete");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_table(&result),
    }
    Ok(())
}

/// Prices a parsed request.
///
/// # Errors
///
/// `InvalidArgument` when a Boston or LEPO product is paired with a Monte
/// Carlo method or carries other than one underlying; any engine error
/// otherwise.
pub fn evaluate(request: &ValuationRequest) -> Result<ValuationResult> {
    match request.product {
        Product::Vanilla => {
            let pricer = request.method.to_pricer()?;
            Ok(pricer.price(&request.underlyings, &request.contract)?)
        }
        Product::Boston => {
            let underlying = single_underlying(request)?;
            let config = request.method.lattice_config()?;
            Ok(price_boston(underlying, &request.contract, &config)?)
        }
        Product::Lepo => {
            let underlying = single_underlying(request)?;
            let config = request.method.lattice_config()?;
            Ok(price_low_exercise_price(
                underlying,
                request.contract.maturity,
                request.contract.rate,
                &config,
            )?)
        }
    }
}

fn single_underlying(request: &ValuationRequest) -> Result<&Underlying> {
    match request.underlyings.as_slice() {
        [underlying] => Ok(underlying),
        other => Err(CliError::InvalidArgument(format!(
            "{:?} requires exactly one underlying, got {}",
            request.product,
            other.len()
        ))),
    }
}

fn print_table(result: &ValuationResult) {
    println!("\n┌──────────────┬──────────────────────────┐");
    println!("│ Field        │ Value                    │");
    println!("├──────────────┼──────────────────────────┤");
    println!("│ Method       │ {:<24} │", result.method.code());
    println!("│ Price        │ {:<24.10} │", result.price);
    match result.std_error {
        Some(se) => println!("│ Std error    │ {:<24.10} │", se),
        None => println!("│ Std error    │ {:<24} │", "n/a"),
    }
    println!("│ Steps        │ {:<24} │", result.n_steps);
    if let Some(n_paths) = result.n_paths {
        println!("│ Paths        │ {:<24} │", n_paths);
    }
    if let Some(params) = &result.lattice_params {
        println!("│ u            │ {:<24.10} │", params.u);
        println!("│ d            │ {:<24.10} │", params.d);
        println!("│ p            │ {:<24.10} │", params.p);
    }
    println!("└──────────────┴──────────────────────────┘");
    println!("{}", result.sub_method);
}
