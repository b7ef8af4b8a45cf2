//! Monte Carlo estimator statistics
//!
//! Given per-path discounted payoffs `Y₁..Y_N`:
//!
//! ```text
//! mean = (1/N) Σ Yᵢ
//! var  = 1/(N-1) Σ (Yᵢ - mean)²
//! CI   = mean ± z · √(var / N)
//! ```
//!
//! `z = 1.96` at the 95% level; other levels use the standard normal quantile.

use crate::error::{validation::*, McError, McResult};
use crate::linalg::Vector;
use crate::math_utils::norm_inv_cdf;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default confidence level of reported intervals
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Two-sided normal critical value at 95%
pub const Z_95: f64 = 1.96;

/// Two-sided critical value for `level`
pub fn z_score(level: f64) -> McResult<f64> {
    validate_probability("confidence", level)?;
    if level == DEFAULT_CONFIDENCE {
        return Ok(Z_95);
    }
    Ok(norm_inv_cdf(0.5 + level / 2.0))
}

/// Estimated price with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    pub mean: f64,
    pub lb: f64,
    pub ub: f64,
    pub var: f64,
    pub n_sim: usize,
    pub confidence: f64,
}

impl PricingResult {
    /// Statistics of `payoffs` with a 95% interval
    pub fn from_payoffs(payoffs: &Vector<f64>) -> McResult<Self> {
        Self::from_payoffs_with_confidence(payoffs, DEFAULT_CONFIDENCE)
    }

    pub fn from_payoffs_with_confidence(payoffs: &Vector<f64>, confidence: f64) -> McResult<Self> {
        let z = z_score(confidence)?;
        let n_sim = payoffs.len();
        validate_paths(n_sim)?;

        let mean = payoffs.mean()?;
        let var = payoffs.var()?;
        let half_width = z * (var / n_sim as f64).sqrt();

        if !mean.is_finite() || !var.is_finite() {
            return Err(McError::InvalidParameter {
                parameter: "payoffs".to_string(),
                value: if mean.is_finite() { var } else { mean },
                constraint: "payoff statistics must be finite".to_string(),
            });
        }

        Ok(PricingResult {
            mean,
            lb: mean - half_width,
            ub: mean + half_width,
            var,
            n_sim,
            confidence,
        })
    }

    /// Standard error of the mean, √(var / N)
    pub fn std_error(&self) -> f64 {
        (self.var / self.n_sim as f64).sqrt()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lb <= value && value <= self.ub
    }

    /// Statistic by name: `mean`, `lb`, `ub` or `var`
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "mean" => Some(self.mean),
            "lb" => Some(self.lb),
            "ub" => Some(self.ub),
            "var" => Some(self.var),
            _ => None,
        }
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("mean", self.mean),
            ("lb", self.lb),
            ("ub", self.ub),
            ("var", self.var),
        ])
    }
}
