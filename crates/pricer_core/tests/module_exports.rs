//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute paths.

/// Test that combinatorics helpers are accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use pricer_core::math::combinatorics::binomial_log_weights;
    use pricer_core::math::combinatorics::log_factorials;

    let table = log_factorials::<f64>(5);
    assert_eq!(table.len(), 6);
    assert!((table[5] - 120.0_f64.ln()).abs() < 1e-12);

    let weights = binomial_log_weights(3, 0.25_f64);
    assert_eq!(weights.len(), 4);
}

/// Test that the error type is accessible via both paths.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError as Direct;
    use pricer_core::types::PricingError;

    let err: Direct = PricingError::Cancelled;
    assert!(matches!(err, PricingError::Cancelled));
}

/// Test that the validation helpers return the checked value.
#[test]
fn test_validation_helpers() {
    use pricer_core::types::PricingError;

    assert_eq!(PricingError::require_positive("spot", 50.0).unwrap(), 50.0);
    assert_eq!(PricingError::require_non_negative("rate", 0.0).unwrap(), 0.0);
    assert!(matches!(
        PricingError::require_positive("vol", 0.0),
        Err(PricingError::NonPositiveInput { name: "vol", .. })
    ));
    assert!(matches!(
        PricingError::require_len("weights", 3, 2),
        Err(PricingError::DimensionMismatch {
            expected: 3,
            got: 2,
            ..
        })
    ));
}
