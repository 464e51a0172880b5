//! Numeric helpers shared by the valuation engines.
//!
//! - [`combinatorics`]: log-factorial tables and binomial log-weights

pub mod combinatorics;
