pub mod black_scholes;
pub mod model;

pub use black_scholes::{BlackScholes, NoiseMode};
pub use model::StochasticModel;
