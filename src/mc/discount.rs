//! Discount-factor helpers for callers that price off a flat rate

use crate::error::{validation::*, McResult};
use crate::linalg::Vector;

/// `exp(-r · tᵢ)` for `tᵢ = i · T / n_steps`, `i = 1..=n_steps`
///
/// The last element is the terminal factor `exp(-r · T)`.
pub fn flat_discount_factors(r: f64, t: f64, n_steps: usize) -> McResult<Vector<f64>> {
    validate_finite("r", r)?;
    validate_positive("t", t)?;
    validate_steps(n_steps)?;
    let dt = t / n_steps as f64;
    Ok((1..=n_steps).map(|i| (-r * dt * i as f64).exp()).collect())
}
