// src/math_utils.rs
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::function::erf;
use std::f64::consts::SQRT_2;
use std::time::{Duration, Instant};

/// Standard normal CDF Φ(x)
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Standard normal quantile Φ⁻¹(p); NaN outside (0, 1)
pub fn norm_inv_cdf(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Wall-clock stopwatch for reporting run times
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    pub fn restart(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(norm_cdf(1.96), 0.975, epsilon = 1e-4);
        assert_relative_eq!(norm_cdf(-1.0) + norm_cdf(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_inv_cdf() {
        assert_relative_eq!(norm_inv_cdf(0.975), 1.959964, epsilon = 1e-5);
        assert_relative_eq!(norm_inv_cdf(0.5), 0.0, epsilon = 1e-9);
        assert!(norm_inv_cdf(0.0).is_nan());
        assert!(norm_inv_cdf(1.0).is_nan());
    }

    #[test]
    fn test_timer() {
        let mut timer = Timer::new();
        assert!(timer.elapsed_ms() >= 0.0);
        timer.restart();
        assert!(timer.elapsed() < Duration::from_secs(60));
    }
}
