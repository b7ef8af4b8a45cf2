// src/models/black_scholes.rs
//! Black-Scholes (geometric Brownian motion) dynamics
//!
//! # Exact Step
//!
//! ```text
//! S_{t+dt} = S_t * exp((r - d - σ²/2) dt + σ √dt Z),   Z ~ N(0,1)
//! ```
//!
//! # Noise Modes
//!
//! [`NoiseMode::SharedPerStep`] draws one `Z` per call and applies it to every
//! path, so all paths in a run follow the same trajectory. This is the default.
//! [`NoiseMode::IndependentPerPath`] draws a fresh `Z` for every path on every
//! step, which is what a pricing run normally wants.

use super::model::StochasticModel;
use crate::error::{validation::*, McResult};
use crate::linalg::Vector;
use crate::rng::{self, DEFAULT_SEED};
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;
use tracing::trace;

/// How normal draws are shared across the cross-section in one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoiseMode {
    /// One draw per step, applied to every path
    #[default]
    SharedPerStep,
    /// One draw per path per step
    IndependentPerPath,
}

pub struct BlackScholes<R = StdRng> {
    r: f64,
    sigma: f64,
    d: f64,
    noise: NoiseMode,
    rng: R,
}

impl BlackScholes<StdRng> {
    /// Model seeded with [`DEFAULT_SEED`]
    pub fn new(r: f64, sigma: f64, d: f64) -> McResult<Self> {
        Self::with_rng(r, sigma, d, rng::seed_rng_from_u64(DEFAULT_SEED))
    }
}

impl<R: Rng> BlackScholes<R> {
    /// Model drawing from a caller-supplied generator
    pub fn with_rng(r: f64, sigma: f64, d: f64, rng: R) -> McResult<Self> {
        validate_finite("r", r)?;
        validate_finite("sigma", sigma)?;
        validate_non_negative("sigma", sigma)?;
        validate_finite("d", d)?;
        Ok(BlackScholes {
            r,
            sigma,
            d,
            noise: NoiseMode::default(),
            rng,
        })
    }

    pub fn with_noise(mut self, noise: NoiseMode) -> Self {
        self.noise = noise;
        self
    }

    pub fn noise(&self) -> NoiseMode {
        self.noise
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Log-drift per unit time: r - d - σ²/2
    fn log_drift(&self) -> f64 {
        self.r - self.d - 0.5 * self.sigma * self.sigma
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * (self.log_drift() * dt + self.sigma * dt.sqrt() * normal_draw).exp()
    }
}

impl<R: Rng> StochasticModel for BlackScholes<R> {
    fn name(&self) -> &str {
        "Black-Scholes"
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("r", self.r), ("sigma", self.sigma), ("d", self.d)]
    }

    fn simulate(&mut self, current: &Vector<f64>, dt: f64) -> McResult<Vector<f64>> {
        validate_finite("dt", dt)?;
        validate_non_negative("dt", dt)?;

        let drift = self.log_drift() * dt;
        let vol = self.sigma * dt.sqrt();

        match self.noise {
            NoiseMode::SharedPerStep => {
                let z = rng::get_normal_draw(&mut self.rng);
                trace!(dt, z, paths = current.len(), "shared black-scholes step");
                current.mul_scalar((drift + vol * z).exp())
            }
            NoiseMode::IndependentPerPath => {
                let source = &mut self.rng;
                trace!(dt, paths = current.len(), "independent black-scholes step");
                Ok(current
                    .iter()
                    .map(|&s| s * (drift + vol * rng::get_normal_draw(&mut *source)).exp())
                    .collect())
            }
        }
    }
}

impl<R> fmt::Display for BlackScholes<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: Black-Scholes")?;
        writeln!(f, "r: {}", self.r)?;
        writeln!(f, "sigma: {}", self.sigma)?;
        write!(f, "d: {}", self.d)
    }
}

impl<R> fmt::Debug for BlackScholes<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlackScholes")
            .field("r", &self.r)
            .field("sigma", &self.sigma)
            .field("d", &self.d)
            .field("noise", &self.noise)
            .finish_non_exhaustive()
    }
}
