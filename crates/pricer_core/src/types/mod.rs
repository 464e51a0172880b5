//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for lattice and Monte Carlo valuation
//!
//! # Re-exports
//!
//! [`PricingError`] is re-exported at module level for convenience.

pub mod error;

pub use error::PricingError;
