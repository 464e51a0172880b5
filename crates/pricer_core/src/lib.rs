//! # pricer_core: Foundation Layer for Option Valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError` (`types::error`)
//! - Log-space combinatorics for binomial weighting (`math::combinatorics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::combinatorics::binomial_log_weights;
//! use pricer_core::types::PricingError;
//!
//! // Risk-neutral weights of a 4-step tree, accumulated in log space
//! let weights = binomial_log_weights(4, 0.5_f64);
//! let total: f64 = weights.iter().map(|w| w.exp()).sum();
//! assert!((total - 1.0).abs() < 1e-12);
//!
//! let err = PricingError::NonPositiveInput { name: "spot", value: -1.0 };
//! assert!(err.to_string().contains("spot"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error values

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
