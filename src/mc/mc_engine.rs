// src/mc/mc_engine.rs
use crate::error::{validation::*, McError, McResult};
use crate::linalg::{Matrix, Vector};
use crate::mc::discount::flat_discount_factors;
use crate::mc::payoffs::{Payoff, PayoffKind};
use crate::mc::stats::{PricingResult, DEFAULT_CONFIDENCE};
use crate::models::{BlackScholes, NoiseMode, StochasticModel};
use crate::rng::{self, DEFAULT_SEED};
use tracing::{debug, trace, warn};

/// Paths from the last simulation together with the inputs that produced them
#[derive(Debug, Clone)]
struct SimulatedPaths {
    matrix: Matrix<f64>,
    s0: f64,
    t: f64,
}

/// Monte Carlo pricer for one model and one option
///
/// # Phases
///
/// 1. **Simulate**: an `N_sim × (N_steps + 1)` matrix is filled one column
///    (one time step across every path) at a time:
///    ```text
///    S[·, 0]   = S_0
///    S[·, i+1] = model.simulate(S[·, i], dt),   dt = T / N_steps
///    ```
/// 2. **Price**: the option maps every row to a discounted payoff and the
///    sample mean, variance and confidence interval are reported.
///
/// # Path Cache
///
/// The simulated matrix is kept and reused by [`MonteCarlo::price`] while
/// `(N_sim, N_steps)` stay the same, so re-pricing consumes no random draws.
/// Any change in either dimension forces a fresh simulation. The cache key
/// does not include `S_0` or `T`; call [`MonteCarlo::clear_cache`] after
/// changing them.
pub struct MonteCarlo<M, P> {
    model: M,
    option: P,
    confidence: f64,
    cache: Option<SimulatedPaths>,
}

impl<M: StochasticModel, P: Payoff> MonteCarlo<M, P> {
    pub fn new(model: M, option: P) -> Self {
        MonteCarlo {
            model,
            option,
            confidence: DEFAULT_CONFIDENCE,
            cache: None,
        }
    }

    /// Report intervals at `level` instead of 95%
    pub fn with_confidence(mut self, level: f64) -> McResult<Self> {
        validate_probability("confidence", level)?;
        self.confidence = level;
        Ok(self)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn option(&self) -> &P {
        &self.option
    }

    pub fn cached_paths(&self) -> Option<&Matrix<f64>> {
        self.cache.as_ref().map(|c| &c.matrix)
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    /// Generate `n_sim` paths of `n_steps` steps and cache them
    pub fn simulate(
        &mut self,
        n_sim: usize,
        n_steps: usize,
        s0: f64,
        t: f64,
    ) -> McResult<&Matrix<f64>> {
        if n_sim == 0 {
            return Err(McError::insufficient_data("simulated paths", 1, 0));
        }
        validate_steps(n_steps)?;
        validate_positive("s0", s0)?;
        validate_finite("s0", s0)?;
        validate_positive("t", t)?;
        validate_finite("t", t)?;

        let dt = t / n_steps as f64;
        debug!(
            model = self.model.name(),
            n_sim, n_steps, s0, t, dt, "simulating paths"
        );

        let mut paths = Matrix::new(n_sim, n_steps + 1, 0.0);
        paths.insert_col(0, Vector::new(n_sim, s0))?;

        for i in 0..n_steps {
            let next = self.model.simulate(paths.col_ref(i)?, dt)?;
            paths.insert_col(i + 1, next)?;
            trace!(step = i + 1, "inserted cross-section");
        }

        let cache = self.cache.insert(SimulatedPaths {
            matrix: paths,
            s0,
            t,
        });
        Ok(&cache.matrix)
    }

    /// Price the option, reusing cached paths when `(n_sim, n_steps)` match
    pub fn price(
        &mut self,
        discount_factors: &Vector<f64>,
        s0: f64,
        t: f64,
        n_sim: usize,
        n_steps: usize,
    ) -> McResult<PricingResult> {
        validate_paths(n_sim)?;
        if discount_factors.len() < n_steps {
            return Err(McError::insufficient_data(
                "discount factors",
                n_steps,
                discount_factors.len(),
            ));
        }

        match &self.cache {
            Some(cached) if cached.matrix.shape() == (n_sim, n_steps + 1) => {
                debug!(n_sim, n_steps, "reusing cached paths");
                if cached.s0 != s0 || cached.t != t {
                    warn!(
                        cached_s0 = cached.s0,
                        cached_t = cached.t,
                        s0,
                        t,
                        "cached paths were simulated with different s0/t"
                    );
                }
            }
            _ => {
                self.simulate(n_sim, n_steps, s0, t)?;
            }
        }

        self.price_cached(discount_factors)
    }

    /// Price against the cached paths without simulating
    pub fn price_cached(&self, discount_factors: &Vector<f64>) -> McResult<PricingResult> {
        let paths = self
            .cached_paths()
            .ok_or_else(|| McError::insufficient_data("cached path matrix", 1, 0))?;
        let n_steps = paths.columns() - 1;
        if discount_factors.len() < n_steps {
            return Err(McError::insufficient_data(
                "discount factors",
                n_steps,
                discount_factors.len(),
            ));
        }

        let payoffs = self.option.payoff_paths(paths, discount_factors)?;
        let result = PricingResult::from_payoffs_with_confidence(&payoffs, self.confidence)?;
        debug!(
            option = self.option.name(),
            mean = result.mean,
            lb = result.lb,
            ub = result.ub,
            var = result.var,
            "priced"
        );
        Ok(result)
    }
}

#[derive(Clone, Debug)]
pub struct McConfig {
    pub paths: usize,
    pub steps: usize,
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
    pub d: f64,
    pub t: f64,
    pub seed: u64,
    pub noise: NoiseMode,
    pub confidence: f64,
    pub payoff: PayoffKind,
}

impl McConfig {
    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> McResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_positive("s0", self.s0)?;
        validate_finite("s0", self.s0)?;
        validate_finite("r", self.r)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_finite("d", self.d)?;
        validate_positive("t", self.t)?;
        validate_finite("t", self.t)?;
        validate_probability("confidence", self.confidence)?;
        Ok(())
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            paths: 100_000,
            steps: 1,
            s0: 100.0,
            r: 0.05,
            sigma: 0.2,
            d: 0.0,
            t: 1.0,
            seed: DEFAULT_SEED,
            noise: NoiseMode::default(),
            confidence: DEFAULT_CONFIDENCE,
            payoff: PayoffKind::EuropeanCall { k: 100.0 },
        }
    }
}

/// Engine for a validated configuration, with nothing simulated yet
pub fn build_engine(cfg: &McConfig) -> McResult<MonteCarlo<BlackScholes, Box<dyn Payoff>>> {
    cfg.validate()?;
    let model = BlackScholes::with_rng(cfg.r, cfg.sigma, cfg.d, rng::seed_rng_from_u64(cfg.seed))?
        .with_noise(cfg.noise);
    let payoff = cfg.payoff.build()?;
    MonteCarlo::new(model, payoff).with_confidence(cfg.confidence)
}

/// Monte Carlo pricing under Black-Scholes with flat-rate discounting
///
/// Discount factors are `exp(-r · tᵢ)` on the simulation grid.
pub fn mc_price_option_gbm(cfg: &McConfig) -> McResult<PricingResult> {
    let mut engine = build_engine(cfg)?;
    let discount_factors = flat_discount_factors(cfg.r, cfg.t, cfg.steps)?;
    engine.price(&discount_factors, cfg.s0, cfg.t, cfg.paths, cfg.steps)
}
