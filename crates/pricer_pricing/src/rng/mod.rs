//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for the Monte Carlo engines.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is built from an explicit seed
//!   threaded through the valuation call; there is no process-wide state
//! - **Independent streams**: [`PricerRng::for_stream`] derives a
//!   decorrelated generator per simulated path so path evaluation order
//!   (sequential or parallel) does not change results
//! - **Efficiency**: batch fills into caller-owned `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(10987);
//! let z = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 16];
//! rng.fill_normal(&mut buffer);
//! # let _ = z;
//! ```

mod prng;

pub use prng::PricerRng;
