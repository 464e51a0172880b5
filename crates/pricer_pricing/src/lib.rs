//! # Pricer Engines (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing holds the numerical valuation engines of the workspace:
//! - Cox-Ross-Rubinstein binomial lattice with optional early exercise
//! - Correlated multi-asset Monte Carlo (basket and spread variants)
//! - Seeded random number generation and cooperative cancellation
//!
//! Inputs come from Layer 2 (`pricer_models`): [`Underlying`],
//! [`ContractSpec`] and [`CorrelationMatrix`]. All failures are reported as
//! Layer 1's [`PricingError`].
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight, Underlying};
//! use pricer_pricing::lattice::LatticeConfig;
//! use pricer_pricing::valuation::price_via_lattice;
//!
//! let stock = Underlying::new(50.0, 0.3);
//! let put = ContractSpec::new(OptionRight::Put, 52.0, 2.0, 0.05)
//!     .with_exercise(ExerciseStyle::American);
//! let config = LatticeConfig::builder().n_steps(2).build().unwrap();
//!
//! let result = price_via_lattice(&stock, &put, &config).unwrap();
//! assert!((result.price - 7.42840190270483).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for results, trees, paths and
//!   lattice parameters
//!
//! [`Underlying`]: pricer_models::instruments::Underlying
//! [`ContractSpec`]: pricer_models::instruments::ContractSpec
//! [`CorrelationMatrix`]: pricer_models::models::CorrelationMatrix
//! [`PricingError`]: pricer_core::types::PricingError

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

mod cancel;

pub mod lattice;
pub mod mc;
pub mod products;
pub mod rng;
pub mod valuation;

pub use cancel::CancelToken;
pub use valuation::{
    price_via_lattice, price_via_monte_carlo, History, McVariant, Pricer, PricingEngine,
    PricingMethod, ValuationResult,
};
