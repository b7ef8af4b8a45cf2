//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Every payoff is discounted inside the payoff itself, using the
//! discount-factor vector supplied by the caller.
//!
//! ## European Options
//! - **Call**: DF_T · max(S_T - K, 0)
//! - **Put**: DF_T · max(K - S_T, 0)
//!
//! ## Path-Dependent Options
//! - **Cliquet**: Σᵢ DFᵢ · max(L·(Sᵢ - Sᵢ₋₁), 0), summed over every step
//! - **Asian**: DF_T · max(Avg(S_t) - K, 0)
//! - **Barrier**: European payoff, knocked out if the path touches H
//!
//! # Discount Alignment
//!
//! For a path with `N` steps, step `i` (1-based) uses `DF[i]` whenever the
//! vector holds at least `N + 1` factors, leaving index 0 (valuation date)
//! unused. A vector of exactly `N` factors has no valuation-date entry and
//! step `i` uses `DF[i - 1]`. The terminal factor is always the last element.

use crate::error::{validation::*, McError, McResult};
use crate::linalg::{Matrix, Vector};
use std::fmt;

/// Discounted payoff of a simulated path
pub trait Payoff {
    fn name(&self) -> &str;

    /// Named parameters in a stable order
    fn params(&self) -> Vec<(&'static str, f64)>;

    fn param(&self, key: &str) -> Option<f64> {
        self.params()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// Discounted payoff of one path `[S_0, S_1, ..., S_N]`
    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64>;

    /// Discounted payoff of every row of `paths`
    fn payoff_paths(
        &self,
        paths: &Matrix<f64>,
        discount_factors: &Vector<f64>,
    ) -> McResult<Vector<f64>> {
        paths
            .row_iter()
            .map(|path| self.payoff(&path, discount_factors))
            .collect()
    }
}

impl<P: Payoff + ?Sized> Payoff for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        (**self).params()
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        (**self).payoff(path, discount_factors)
    }

    fn payoff_paths(
        &self,
        paths: &Matrix<f64>,
        discount_factors: &Vector<f64>,
    ) -> McResult<Vector<f64>> {
        (**self).payoff_paths(paths, discount_factors)
    }
}

impl fmt::Display for dyn Payoff + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Option: {}", self.name())?;
        for (name, value) in self.params() {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

/// Last discount factor
pub fn terminal_discount(discount_factors: &Vector<f64>) -> McResult<f64> {
    discount_factors
        .last()
        .ok_or_else(|| McError::insufficient_data("discount factors", 1, 0))
}

/// Discount factor for `step` (1-based) of an `n_steps` path
pub fn step_discount(discount_factors: &Vector<f64>, n_steps: usize, step: usize) -> McResult<f64> {
    let len = discount_factors.len();
    if len < n_steps {
        return Err(McError::insufficient_data("discount factors", n_steps, len));
    }
    if step == 0 || step > n_steps {
        return Err(McError::index_out_of_range("path steps", step, n_steps + 1));
    }
    if len > n_steps {
        discount_factors.get(step)
    } else {
        discount_factors.get(step - 1)
    }
}

fn terminal_price(path: &Vector<f64>) -> McResult<f64> {
    path.last()
        .ok_or_else(|| McError::insufficient_data("path prices", 1, 0))
}

fn terminal_column(paths: &Matrix<f64>) -> McResult<&Vector<f64>> {
    match paths.columns() {
        0 => Err(McError::insufficient_data("path matrix columns", 1, 0)),
        n => paths.col_ref(n - 1),
    }
}

fn validate_level(name: &str, value: f64) -> McResult<()> {
    validate_finite(name, value)?;
    validate_non_negative(name, value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanCall {
    k: f64,
}

impl EuropeanCall {
    pub fn new(k: f64) -> McResult<Self> {
        validate_level("K", k)?;
        Ok(EuropeanCall { k })
    }

    pub fn strike(&self) -> f64 {
        self.k
    }
}

impl Payoff for EuropeanCall {
    fn name(&self) -> &str {
        "European Call"
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("K", self.k)]
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        let df_t = terminal_discount(discount_factors)?;
        Ok(df_t * (terminal_price(path)? - self.k).max(0.0))
    }

    fn payoff_paths(
        &self,
        paths: &Matrix<f64>,
        discount_factors: &Vector<f64>,
    ) -> McResult<Vector<f64>> {
        let df_t = terminal_discount(discount_factors)?;
        terminal_column(paths)?
            .sub_scalar(self.k)?
            .max_scalar(0.0)
            .mul_scalar(df_t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanPut {
    k: f64,
}

impl EuropeanPut {
    pub fn new(k: f64) -> McResult<Self> {
        validate_level("K", k)?;
        Ok(EuropeanPut { k })
    }

    pub fn strike(&self) -> f64 {
        self.k
    }
}

impl Payoff for EuropeanPut {
    fn name(&self) -> &str {
        "European Put"
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("K", self.k)]
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        let df_t = terminal_discount(discount_factors)?;
        Ok(df_t * (self.k - terminal_price(path)?).max(0.0))
    }

    fn payoff_paths(
        &self,
        paths: &Matrix<f64>,
        discount_factors: &Vector<f64>,
    ) -> McResult<Vector<f64>> {
        let df_t = terminal_discount(discount_factors)?;
        terminal_column(paths)?
            .rsub_scalar(self.k)?
            .max_scalar(0.0)
            .mul_scalar(df_t)
    }
}

/// Sum of discounted, floored period-over-period gains scaled by `L`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cliquet {
    l: f64,
}

impl Cliquet {
    pub fn new(l: f64) -> McResult<Self> {
        validate_level("L", l)?;
        Ok(Cliquet { l })
    }

    pub fn participation(&self) -> f64 {
        self.l
    }
}

impl Payoff for Cliquet {
    fn name(&self) -> &str {
        "Cliquet"
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("L", self.l)]
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        let n_steps = path.len().saturating_sub(1);
        let mut total = 0.0;
        for i in 1..=n_steps {
            let gain = (self.l * (path[i] - path[i - 1])).max(0.0);
            total += step_discount(discount_factors, n_steps, i)? * gain;
        }
        Ok(total)
    }

    fn payoff_paths(
        &self,
        paths: &Matrix<f64>,
        discount_factors: &Vector<f64>,
    ) -> McResult<Vector<f64>> {
        let n_steps = paths.columns().saturating_sub(1);
        let mut total = Vector::zeros(paths.rows());
        for i in 1..=n_steps {
            let df_i = step_discount(discount_factors, n_steps, i)?;
            let gains = paths
                .col_ref(i)?
                .sub_vector(paths.col_ref(i - 1)?)?
                .mul_scalar(self.l)?
                .max_scalar(0.0)
                .mul_scalar(df_i)?;
            total = total.add_vector(&gains)?;
        }
        Ok(total)
    }
}

/// Arithmetic-average Asian call over every observed price, including S_0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsianCall {
    k: f64,
}

impl AsianCall {
    pub fn new(k: f64) -> McResult<Self> {
        validate_level("K", k)?;
        Ok(AsianCall { k })
    }
}

impl Payoff for AsianCall {
    fn name(&self) -> &str {
        "Asian Call"
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("K", self.k)]
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        let df_t = terminal_discount(discount_factors)?;
        let average_price = path.mean()?;
        Ok(df_t * (average_price - self.k).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

/// Up-and-out barrier: worthless once any observed price reaches `H`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpAndOutBarrier {
    k: f64,
    h: f64,
    option_type: OptionType,
}

impl UpAndOutBarrier {
    pub fn new(k: f64, h: f64, option_type: OptionType) -> McResult<Self> {
        validate_level("K", k)?;
        validate_level("H", h)?;
        Ok(UpAndOutBarrier { k, h, option_type })
    }
}

impl Payoff for UpAndOutBarrier {
    fn name(&self) -> &str {
        match self.option_type {
            OptionType::Call => "Up-and-Out Barrier Call",
            OptionType::Put => "Up-and-Out Barrier Put",
        }
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![("K", self.k), ("H", self.h)]
    }

    fn payoff(&self, path: &Vector<f64>, discount_factors: &Vector<f64>) -> McResult<f64> {
        let df_t = terminal_discount(discount_factors)?;
        let s_t = terminal_price(path)?;
        if path.iter().any(|&price| price >= self.h) {
            return Ok(0.0);
        }
        let intrinsic = match self.option_type {
            OptionType::Call => s_t - self.k,
            OptionType::Put => self.k - s_t,
        };
        Ok(df_t * intrinsic.max(0.0))
    }
}

/// Enumeration of supported payoff types, by value
///
/// Used by configuration and the CLI to describe a contract before the
/// validated payoff object is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffKind {
    /// DF_T · max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// DF_T · max(K - S_T, 0)
    EuropeanPut { k: f64 },

    /// Σ DFᵢ · max(L·(Sᵢ - Sᵢ₋₁), 0)
    Cliquet { l: f64 },

    /// DF_T · max(Avg(S_t) - K, 0)
    AsianCall { k: f64 },

    /// DF_T · max(S_T - K, 0) if max(S_t) < H, else 0
    BarrierCallUpAndOut { k: f64, h: f64 },

    /// DF_T · max(K - S_T, 0) if max(S_t) < H, else 0
    BarrierPutUpAndOut { k: f64, h: f64 },
}

impl PayoffKind {
    pub fn build(&self) -> McResult<Box<dyn Payoff>> {
        Ok(match *self {
            PayoffKind::EuropeanCall { k } => Box::new(EuropeanCall::new(k)?),
            PayoffKind::EuropeanPut { k } => Box::new(EuropeanPut::new(k)?),
            PayoffKind::Cliquet { l } => Box::new(Cliquet::new(l)?),
            PayoffKind::AsianCall { k } => Box::new(AsianCall::new(k)?),
            PayoffKind::BarrierCallUpAndOut { k, h } => {
                Box::new(UpAndOutBarrier::new(k, h, OptionType::Call)?)
            }
            PayoffKind::BarrierPutUpAndOut { k, h } => {
                Box::new(UpAndOutBarrier::new(k, h, OptionType::Put)?)
            }
        })
    }

    /// Strike of European contracts, for closed-form comparison
    pub fn european_strike(&self) -> Option<(OptionType, f64)> {
        match *self {
            PayoffKind::EuropeanCall { k } => Some((OptionType::Call, k)),
            PayoffKind::EuropeanPut { k } => Some((OptionType::Put, k)),
            _ => None,
        }
    }
}
