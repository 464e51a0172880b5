//! Lattice parameter derivation (Cox-Ross-Rubinstein).

use pricer_core::types::PricingError;

/// One-shot parameters of an n-step CRR lattice.
///
/// Invariants for every value returned by [`LatticeParameters::build`]:
/// - `d < 1 < u` and `u * d = 1`
/// - `0 <= p <= 1`
/// - `p * u + (1 - p) * d = a`
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeParameters;
///
/// let lt = LatticeParameters::build(0.3, 0.05, 0.0, 2.0, 2).unwrap();
/// assert!((lt.u - 1.3498588075760032).abs() < 1e-15);
/// assert!((lt.p - 0.5097408651817704).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters {
    /// Up factor exp(vol √dt).
    pub u: f64,
    /// Down factor 1/u.
    pub d: f64,
    /// One-step growth factor exp((r - q) dt).
    pub a: f64,
    /// Risk-neutral up probability (a - d) / (u - d).
    pub p: f64,
    /// Time step T/n.
    pub dt: f64,
    /// One-step discount factor exp(-r dt).
    pub df_dt: f64,
    /// Full-horizon discount factor exp(-r T).
    pub df_t: f64,
    /// Number of steps n.
    pub n_steps: usize,
}

impl LatticeParameters {
    /// Derives lattice parameters from market inputs.
    ///
    /// # Arguments
    ///
    /// * `vol` - volatility (>= 0)
    /// * `rate` - risk-free rate r (>= 0)
    /// * `div_yield` - dividend yield q (>= 0)
    /// * `maturity` - T in years (> 0)
    /// * `n_steps` - step count n (>= 1)
    ///
    /// # Errors
    ///
    /// - `NonPositiveInput` for out-of-domain market inputs
    /// - `InvalidConfig` for `n_steps == 0`
    /// - `InvalidLatticeParameters` if p falls outside [0, 1]; p is never clamped
    pub fn build(
        vol: f64,
        rate: f64,
        div_yield: f64,
        maturity: f64,
        n_steps: usize,
    ) -> Result<Self, PricingError> {
        PricingError::require_non_negative("vol", vol)?;
        PricingError::require_non_negative("rate", rate)?;
        PricingError::require_non_negative("div_yield", div_yield)?;
        PricingError::require_positive("maturity", maturity)?;
        if n_steps == 0 {
            return Err(PricingError::InvalidConfig(
                "lattice needs at least one step".to_string(),
            ));
        }

        let dt = maturity / n_steps as f64;
        let u = (vol * dt.sqrt()).exp();
        let d = 1.0 / u;
        let a = ((rate - div_yield) * dt).exp();
        let p = (a - d) / (u - d);

        // NaN (u == d at zero vol) fails the range check too
        if !(0.0..=1.0).contains(&p) {
            tracing::warn!(p, u, d, a, dt, "rejecting lattice parameters");
            return Err(PricingError::InvalidLatticeParameters {
                probability: p,
                up: u,
                down: d,
                growth: a,
            });
        }

        let params = Self {
            u,
            d,
            a,
            p,
            dt,
            df_dt: (-rate * dt).exp(),
            df_t: (-rate * maturity).exp(),
            n_steps,
        };
        tracing::debug!(?params, "derived lattice parameters");
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_hull_american_put_parameters() {
        let lt = LatticeParameters::build(0.3, 0.05, 0.0, 2.0, 2).unwrap();
        assert_relative_eq!(lt.dt, 1.0);
        assert_relative_eq!(lt.u, 1.3498588075760032, epsilon = 1e-15);
        assert_relative_eq!(lt.d, 0.7408182206817179, epsilon = 1e-15);
        assert_relative_eq!(lt.a, 1.0512710963760241, epsilon = 1e-15);
        assert_relative_eq!(lt.p, 0.5097408651817704, epsilon = 1e-14);
        assert_relative_eq!(lt.df_dt, 0.951229424500714, epsilon = 1e-15);
        assert_relative_eq!(lt.df_t, 0.9048374180359595, epsilon = 1e-15);
    }

    #[test]
    fn test_low_exercise_price_parameters() {
        let lt = LatticeParameters::build(0.21, 0.05, 0.0, 5.0, 4).unwrap();
        assert_relative_eq!(lt.dt, 1.25);
        assert_relative_eq!(lt.u, 1.264639545918723, epsilon = 1e-14);
        assert_relative_eq!(lt.d, 0.7907391503193345, epsilon = 1e-14);
        assert_relative_eq!(lt.a, 1.0644944589178593, epsilon = 1e-14);
        assert_relative_eq!(lt.p, 0.5776642331186062, epsilon = 1e-13);
        assert_relative_eq!(lt.df_dt, 0.9394130628134758, epsilon = 1e-15);
        assert_relative_eq!(lt.df_t, 0.7788007830714049, epsilon = 1e-15);
    }

    #[test]
    fn test_probability_above_one_rejected() {
        // Growth outruns the up factor: low vol, high rate, one coarse step
        let err = LatticeParameters::build(0.01, 0.5, 0.0, 1.0, 1).unwrap_err();
        match err {
            PricingError::InvalidLatticeParameters { probability, .. } => {
                assert!(probability > 1.0)
            }
            other => panic!("expected InvalidLatticeParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_probability_below_zero_rejected() {
        // Dividend yield far above the rate drags a below d
        let err = LatticeParameters::build(0.01, 0.0, 0.5, 1.0, 1).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidLatticeParameters { probability, .. } if probability < 0.0
        ));
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let err = LatticeParameters::build(0.0, 0.05, 0.0, 1.0, 10).unwrap_err();
        assert!(matches!(err, PricingError::InvalidLatticeParameters { .. }));
    }

    #[test]
    fn test_more_steps_restore_validity() {
        assert!(LatticeParameters::build(0.01, 0.5, 0.0, 1.0, 1).is_err());
        assert!(LatticeParameters::build(0.01, 0.5, 0.0, 1.0, 10_000).is_err());
        assert!(LatticeParameters::build(0.2, 0.5, 0.0, 1.0, 1).is_err());
        assert!(LatticeParameters::build(0.2, 0.5, 0.0, 1.0, 100).is_ok());
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(
            LatticeParameters::build(0.2, 0.05, 0.0, 0.0, 10),
            Err(PricingError::NonPositiveInput {
                name: "maturity",
                ..
            })
        ));
        assert!(matches!(
            LatticeParameters::build(-0.2, 0.05, 0.0, 1.0, 10),
            Err(PricingError::NonPositiveInput { name: "vol", .. })
        ));
        assert!(matches!(
            LatticeParameters::build(0.2, 0.05, 0.0, 1.0, 0),
            Err(PricingError::InvalidConfig(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_valid_parameters_satisfy_invariants(
            vol in 0.05f64..1.0,
            rate in 0.0f64..0.1,
            div in 0.0f64..0.1,
            maturity in 0.1f64..5.0,
            n in 1usize..500,
        ) {
            if let Ok(lt) = LatticeParameters::build(vol, rate, div, maturity, n) {
                prop_assert!(lt.d < 1.0 && 1.0 < lt.u);
                prop_assert!((lt.u * lt.d - 1.0).abs() < 1e-12);
                prop_assert!((0.0..=1.0).contains(&lt.p));
                prop_assert!((lt.p * lt.u + (1.0 - lt.p) * lt.d - lt.a).abs() < 1e-12);
            }
        }
    }
}
