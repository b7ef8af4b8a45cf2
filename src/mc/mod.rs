pub mod discount;
pub mod mc_engine;
pub mod payoffs;
pub mod stats;

pub use discount::flat_discount_factors;
pub use mc_engine::{build_engine, mc_price_option_gbm, McConfig, MonteCarlo};
pub use payoffs::{Payoff, PayoffKind};
pub use stats::PricingResult;
