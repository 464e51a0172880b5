//! Contract and underlying definitions.
//!
//! - [`Underlying`]: spot, volatility and dividend yield of one asset
//! - [`ContractSpec`]: strike, maturity, right, rate and exercise style
//! - [`OptionRight`]: call/put with payoff sign
//! - [`ExerciseStyle`]: European or American

pub mod exercise;
pub mod params;
pub mod payoff;
pub mod vanilla;

pub use exercise::ExerciseStyle;
pub use params::Underlying;
pub use payoff::OptionRight;
pub use vanilla::ContractSpec;
