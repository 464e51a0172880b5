//! Check command implementation
//!
//! Prices the two-step American put reference case and compares it with
//! the published value.

use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight, Underlying};
use pricer_pricing::lattice::LatticeConfig;
use pricer_pricing::price_via_lattice;
use tracing::info;

use crate::{CliError, Result};

/// Two-step American put on S=50, K=52, T=2, r=5%, vol=30%.
pub const REFERENCE_PRICE: f64 = 7.42840190270483;

const TOLERANCE: f64 = 1e-10;

/// Run the check command
pub fn run() -> Result<()> {
    let got = reference_price()?;
    if (got - REFERENCE_PRICE).abs() > TOLERANCE {
        return Err(CliError::CheckFailed {
            expected: REFERENCE_PRICE,
            got,
        });
    }
    info!(price = got, "Reference valuation matches");
    println!("✓ American put reference: {:.14}", got);
    Ok(())
}

fn reference_price() -> Result<f64> {
    let underlying = Underlying::new(50.0, 0.3);
    let contract = ContractSpec::new(OptionRight::Put, 52.0, 2.0, 0.05)
        .with_exercise(ExerciseStyle::American);
    let config = LatticeConfig::builder()
        .n_steps(2)
        .build()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    Ok(price_via_lattice(&underlying, &contract, &config)?.price)
}
