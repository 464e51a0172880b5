//! Monte Carlo aggregation conventions and convergence.
//!
//! # Test Categories
//!
//! 1. **Basket**: shared increments, path-count invariance, determinism
//! 2. **Spread**: convergence to the Margrabe exchange price, standard error
//!    decay, perfect-correlation limit
//! 3. **Errors and cancellation**

use approx::assert_relative_eq;
use pricer_core::types::PricingError;
use pricer_models::instruments::{ContractSpec, OptionRight, Underlying};
use pricer_models::models::CorrelationMatrix;
use pricer_pricing::mc::{BasketSpec, MonteCarloConfig};
use pricer_pricing::{price_via_monte_carlo, CancelToken, History, McVariant, PricingMethod};

/// Standard normal CDF (Abramowitz and Stegun 7.1.26 on erf).
fn norm_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + p * z);
    let erf = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-z * z).exp();

    0.5 * (1.0 + sign * erf)
}

/// Margrabe price of the option to receive asset 2 in exchange for asset 1.
fn margrabe(s1: f64, s2: f64, vol1: f64, vol2: f64, rho: f64, maturity: f64) -> f64 {
    let vol = (vol1 * vol1 - 2.0 * rho * vol1 * vol2 + vol2 * vol2).sqrt();
    let sqrt_t = maturity.sqrt();
    let d1 = (s2 / s1).ln() / (vol * sqrt_t) + 0.5 * vol * sqrt_t;
    let d2 = d1 - vol * sqrt_t;
    s2 * norm_cdf(d1) - s1 * norm_cdf(d2)
}

fn mc_config(n_paths: usize, n_steps: usize) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .build()
        .unwrap()
}

fn hull_basket() -> (Vec<Underlying>, CorrelationMatrix, McVariant) {
    let assets = vec![
        Underlying::new(50.0, 0.2),
        Underlying::new(85.0, 0.1),
        Underlying::new(65.0, 0.05),
        Underlying::new(80.0, 0.2),
        Underlying::new(75.0, 0.3),
    ];
    let corr = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.0, 0.0, 0.9, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, -0.1, 0.0],
        vec![0.9, 0.0, -0.1, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0],
    ])
    .unwrap();
    let variant = McVariant::Basket(BasketSpec::new(vec![0.05, 0.0, 0.1, 0.0, 0.0], vec![0.2; 5]));
    (assets, corr, variant)
}

// ============================================================================
// Basket
// ============================================================================

#[test]
fn test_basket_invariant_in_path_count() {
    let (assets, corr, variant) = hull_basket();
    let put = ContractSpec::new(OptionRight::Put, 80.0, 1.0, 0.05);

    let reference = price_via_monte_carlo(&assets, &put, &corr, &variant, &mc_config(1, 100)).unwrap();
    for n_paths in [10, 100, 1_000] {
        let result = price_via_monte_carlo(&assets, &put, &corr, &variant, &mc_config(n_paths, 100)).unwrap();
        assert_eq!(result.price, reference.price);
    }
    assert_eq!(reference.method, PricingMethod::MonteCarlo);
    assert!(reference.std_error.is_none());
}

#[test]
fn test_basket_parallel_matches_sequential() {
    let (assets, corr, variant) = hull_basket();
    let put = ContractSpec::new(OptionRight::Put, 80.0, 1.0, 0.05);
    let parallel = MonteCarloConfig::builder()
        .n_paths(500)
        .n_steps(100)
        .parallel(true)
        .build()
        .unwrap();

    let seq = price_via_monte_carlo(&assets, &put, &corr, &variant, &mc_config(500, 100)).unwrap();
    let par = price_via_monte_carlo(&assets, &put, &corr, &variant, &parallel).unwrap();
    assert_eq!(seq.price, par.price);
}

#[test]
fn test_basket_seed_determinism() {
    let assets = vec![Underlying::new(30.0, 0.2), Underlying::new(50.0, 0.15)];
    let corr = CorrelationMatrix::pair(0.7).unwrap();
    let variant = McVariant::Basket(BasketSpec::new(vec![0.06, 0.05], vec![0.4, 0.6]));
    let put = ContractSpec::new(OptionRight::Put, 55.0, 3.0, 0.05);

    let seeded = |seed| {
        MonteCarloConfig::builder()
            .n_paths(10)
            .n_steps(1_000)
            .seed(seed)
            .keep_history(true)
            .build()
            .unwrap()
    };

    let a = price_via_monte_carlo(&assets, &put, &corr, &variant, &seeded(10987)).unwrap();
    let b = price_via_monte_carlo(&assets, &put, &corr, &variant, &seeded(10987)).unwrap();
    assert_eq!(a, b);

    let c = price_via_monte_carlo(&assets, &put, &corr, &variant, &seeded(1)).unwrap();
    assert_ne!(a.history, c.history);
}

#[test]
fn test_basket_zero_vol_zero_drift_is_spot_intrinsic() {
    let assets = vec![Underlying::new(42.0, 0.0), Underlying::new(55.0, 0.0)];
    let corr = CorrelationMatrix::identity(2);
    let variant = McVariant::Basket(BasketSpec::new(vec![0.0, 0.0], vec![0.5, 0.5]));
    let call = ContractSpec::new(OptionRight::Call, 40.0, 0.5, 0.1);

    let result = price_via_monte_carlo(&assets, &call, &corr, &variant, &mc_config(10, 50)).unwrap();
    assert_relative_eq!(result.price, (48.5 - 40.0) * (-0.05f64).exp(), epsilon = 1e-12);
}

#[test]
fn test_basket_history_is_single_batch() {
    let (assets, corr, variant) = hull_basket();
    let put = ContractSpec::new(OptionRight::Put, 80.0, 1.0, 0.05);
    let config = MonteCarloConfig::builder()
        .n_paths(100)
        .n_steps(30)
        .keep_history(true)
        .build()
        .unwrap();

    let result = price_via_monte_carlo(&assets, &put, &corr, &variant, &config).unwrap();
    match result.history {
        Some(History::SharedIncrements(inc)) => {
            assert_eq!(inc.n_steps(), 30);
            assert_eq!(inc.dim(), 5);
        }
        other => panic!("expected shared increments, got {:?}", other),
    }
}

#[test]
fn test_basket_rejects_indefinite_correlation() {
    let assets = vec![Underlying::new(100.0, 0.2); 3];
    let corr = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.9, -0.9],
        vec![0.9, 1.0, 0.9],
        vec![-0.9, 0.9, 1.0],
    ])
    .unwrap();
    let variant = McVariant::Basket(BasketSpec::new(vec![0.0; 3], vec![1.0 / 3.0; 3]));
    let call = ContractSpec::new(OptionRight::Call, 100.0, 1.0, 0.05);

    let err = price_via_monte_carlo(&assets, &call, &corr, &variant, &mc_config(10, 10)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidCovariance(_)));
}

// ============================================================================
// Spread
// ============================================================================

#[test]
fn test_spread_converges_to_margrabe() {
    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let corr = CorrelationMatrix::pair(0.4).unwrap();
    let call = ContractSpec::new(OptionRight::Call, 0.0, 2.0, 0.05);
    let config = MonteCarloConfig::builder()
        .n_paths(20_000)
        .n_steps(50)
        .parallel(true)
        .build()
        .unwrap();

    let result = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &config).unwrap();
    let reference = margrabe(30.0, 31.0, 0.2, 0.3, 0.4, 2.0);
    let se = result.std_error.unwrap();

    assert!(
        (result.price - reference).abs() < 4.0 * se + 0.05,
        "MC {} vs Margrabe {} (se {})",
        result.price,
        reference,
        se
    );
}

#[test]
fn test_spread_standard_error_shrinks_with_paths() {
    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let corr = CorrelationMatrix::pair(0.4).unwrap();
    let call = ContractSpec::new(OptionRight::Call, 1.0, 1.0, 0.05);

    let small = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &mc_config(250, 20)).unwrap();
    let large = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &mc_config(16_000, 20)).unwrap();

    // Sixty-four times the paths: roughly an eighth of the error
    assert!(large.std_error.unwrap() < 0.25 * small.std_error.unwrap());
}

#[test]
fn test_spread_seeds_change_price() {
    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let corr = CorrelationMatrix::pair(0.4).unwrap();
    let call = ContractSpec::new(OptionRight::Call, 0.0, 1.0, 0.05);
    let seeded = |seed| {
        MonteCarloConfig::builder()
            .n_paths(200)
            .n_steps(10)
            .seed(seed)
            .build()
            .unwrap()
    };

    let a = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &seeded(1)).unwrap();
    let b = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &seeded(1)).unwrap();
    let c = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &seeded(2)).unwrap();
    assert_eq!(a.price, b.price);
    assert_ne!(a.price, c.price);
}

#[test]
fn test_spread_perfect_correlation_is_intrinsic() {
    let legs = [Underlying::new(45.0, 0.3), Underlying::new(45.0, 0.3)];
    let corr = CorrelationMatrix::pair(1.0).unwrap();
    let put = ContractSpec::new(OptionRight::Put, 3.0, 1.0, 0.04);

    let result = price_via_monte_carlo(&legs, &put, &corr, &McVariant::Spread, &mc_config(500, 25)).unwrap();
    assert_relative_eq!(result.price, 3.0 * (-0.04f64).exp(), epsilon = 1e-9);
}

#[test]
fn test_spread_history_paths() {
    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let corr = CorrelationMatrix::pair(0.4).unwrap();
    let call = ContractSpec::new(OptionRight::Call, 0.0, 1.0, 0.05);
    let config = MonteCarloConfig::builder()
        .n_paths(3)
        .n_steps(12)
        .keep_history(true)
        .build()
        .unwrap();

    let result = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &config).unwrap();
    let Some(History::Paths(paths)) = result.history else {
        panic!("expected per-path history");
    };
    assert_eq!(paths.len(), 3);
    for path in &paths {
        assert_eq!(path.len(), 13);
        assert_eq!(path.initial(), &[30.0, 31.0]);
    }
}

#[test]
fn test_spread_requires_two_assets() {
    let three = vec![Underlying::new(30.0, 0.2); 3];
    let corr = CorrelationMatrix::identity(3);
    let call = ContractSpec::new(OptionRight::Call, 0.0, 1.0, 0.05);

    let err = price_via_monte_carlo(&three, &call, &corr, &McVariant::Spread, &mc_config(10, 10)).unwrap_err();
    assert_eq!(
        err,
        PricingError::DimensionMismatch {
            name: "underlyings",
            expected: 2,
            got: 3
        }
    );
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancelled_run_returns_no_price() {
    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let corr = CorrelationMatrix::pair(0.4).unwrap();
    let call = ContractSpec::new(OptionRight::Call, 0.0, 1.0, 0.05);

    let token = CancelToken::new();
    let config = MonteCarloConfig::builder()
        .n_paths(1_000)
        .n_steps(10)
        .parallel(true)
        .cancel_token(token.clone())
        .build()
        .unwrap();
    token.cancel();

    let result = price_via_monte_carlo(&legs, &call, &corr, &McVariant::Spread, &config);
    assert_eq!(result, Err(PricingError::Cancelled));
}
