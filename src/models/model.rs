// src/models/model.rs
use crate::error::McResult;
use crate::linalg::Vector;

/// One-step dynamics of the underlying across the whole cross-section of paths
pub trait StochasticModel {
    fn name(&self) -> &str;

    /// Named parameters in a stable order
    fn params(&self) -> Vec<(&'static str, f64)>;

    fn param(&self, key: &str) -> Option<f64> {
        self.params()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// Advance every path in `current` by `dt`
    fn simulate(&mut self, current: &Vector<f64>, dt: f64) -> McResult<Vector<f64>>;
}

impl<M: StochasticModel + ?Sized> StochasticModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        (**self).params()
    }

    fn simulate(&mut self, current: &Vector<f64>, dt: f64) -> McResult<Vector<f64>> {
        (**self).simulate(current, dt)
    }
}
