//! Recombining binomial lattice.
//!
//! # Architecture
//!
//! ```text
//! price_via_lattice
//! ├── LatticeConfig      (step count, history retention, cancellation)
//! ├── LatticeParameters  (u, d, a, p, dt, df_dt, df_T from vol/r/q/T/n)
//! └── LatticeEngine
//!     ├── terminal layer      S_i = S0 d^(n-i) u^i
//!     ├── backward induction  (optionally with early exercise)
//!     └── direct sum          European, no history: log-space binomial weights
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_models::instruments::OptionRight;
//! use pricer_pricing::lattice::{LatticeConfig, LatticeEngine, LatticeParameters};
//!
//! let params = LatticeParameters::build(0.3, 0.05, 0.0, 2.0, 2).unwrap();
//! let config = LatticeConfig::builder().n_steps(2).keep_history(true).build().unwrap();
//!
//! let outcome = LatticeEngine::new(&params)
//!     .run(50.0, 52.0, OptionRight::Put, true, &config)
//!     .unwrap();
//! assert!((outcome.value - 7.42840190270483).abs() < 1e-10);
//! assert_eq!(outcome.ref_tree.unwrap().terminal().len(), 3);
//! ```

pub mod config;
pub mod engine;
pub mod params;
pub mod tree;

pub use config::{LatticeConfig, LatticeConfigBuilder};
pub use engine::{LatticeEngine, LatticeOutcome};
pub use params::LatticeParameters;
pub use tree::PriceTree;
