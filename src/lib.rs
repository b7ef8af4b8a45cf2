//! # mc-pricer: Monte Carlo Option Pricing under Black-Scholes
//!
//! Simulates asset price paths under geometric Brownian motion and prices
//! European, cliquet, Asian and barrier options as discounted expected
//! payoffs, with a confidence interval on every estimate.
//!
//! ## Key Features
//!
//! - **Exact GBM steps**: log-normal transitions, no discretisation bias
//! - **Path cache**: re-pricing with the same dimensions draws no new randoms
//! - **Closed-form references**: Black-Scholes prices to check estimates against
//! - **Checked numerics**: every fallible operation returns [`McResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mc_pricer::linalg::Vector;
//! use mc_pricer::mc::payoffs::EuropeanCall;
//! use mc_pricer::mc::MonteCarlo;
//! use mc_pricer::models::{BlackScholes, NoiseMode};
//!
//! let model = BlackScholes::new(0.05, 0.2, 0.0)
//!     .expect("valid parameters")
//!     .with_noise(NoiseMode::IndependentPerPath);
//! let call = EuropeanCall::new(100.0).expect("valid strike");
//! let mut engine = MonteCarlo::new(model, call);
//!
//! let df = Vector::from(vec![(-0.05_f64).exp()]);
//! let result = engine.price(&df, 100.0, 1.0, 10_000, 1).expect("priced");
//! println!("price {:.4} in [{:.4}, {:.4}]", result.mean, result.lb, result.ub);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Under the risk-neutral measure with dividend yield `d`:
//! ```text
//! S(t+dt) = S(t) · exp((r - d - σ²/2) dt + σ √dt Z),   Z ~ N(0, 1)
//! ```
//! The price estimate is the sample mean of discounted payoffs over the
//! simulated paths.

pub mod analytics;
pub mod error;
pub mod linalg;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;

pub use error::{McError, McResult};
