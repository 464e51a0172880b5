//! # Pricer Models (L2: Business Logic)
//!
//! Immutable value types describing what is being priced.
//!
//! This crate provides:
//! - Underlying assets (spot, volatility, dividend yield)
//! - Contract specifications (strike, maturity, right, rate, exercise style)
//! - Correlation matrices with covariance construction and Cholesky factorisation
//!
//! ## Design Principles
//!
//! - **Plain value structs** validated at the engine boundary, never mutated by engines
//! - **Enum-based rights and exercise styles** instead of string dispatch
//! - **PSD-tolerant factorisation** so perfectly correlated or zero-volatility
//!   assets remain priceable

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
