//! Analytical Black-Scholes prices for European options
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model with continuous dividend yield `d`:
//! ```text
//! dS_t = (r - d) S_t dt + σ S_t dW_t
//! ```
//!
//! European prices have closed forms in the standard normal CDF Φ(x). They
//! are reference values for checking Monte Carlo estimates.

use crate::mc::payoffs::OptionType;
use crate::math_utils::norm_cdf;

/// d₁ and d₂
///
/// ```text
/// d₁ = [ln(S/K) + (r - d + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
fn d1_d2(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - d + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C = S e^(-dT) Φ(d₁) - K e^(-rT) Φ(d₂)
/// ```
///
/// With zero volatility or zero maturity the price is the discounted
/// intrinsic value of the forward.
pub fn bs_call_price(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let forward_s = s * (-d * t).exp();
    let discounted_k = k * (-r * t).exp();
    if sigma <= 0.0 || t <= 0.0 {
        return (forward_s - discounted_k).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, d, sigma, t);
    forward_s * norm_cdf(d1) - discounted_k * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P = K e^(-rT) Φ(-d₂) - S e^(-dT) Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    let forward_s = s * (-d * t).exp();
    let discounted_k = k * (-r * t).exp();
    if sigma <= 0.0 || t <= 0.0 {
        return (discounted_k - forward_s).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, r, d, sigma, t);
    discounted_k * norm_cdf(-d2) - forward_s * norm_cdf(-d1)
}

pub fn bs_price(option_type: OptionType, s: f64, k: f64, r: f64, d: f64, sigma: f64, t: f64) -> f64 {
    match option_type {
        OptionType::Call => bs_call_price(s, k, r, d, sigma, t),
        OptionType::Put => bs_put_price(s, k, r, d, sigma, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_values() {
        // Hull's textbook example, S=K=100, r=5%, σ=20%, T=1
        assert_relative_eq!(
            bs_call_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0),
            10.4506,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            bs_put_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0),
            5.5735,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let (s, k, r, d, sigma, t) = (105.0, 95.0, 0.03, 0.02, 0.3, 0.75);
        let call = bs_call_price(s, k, r, d, sigma, t);
        let put = bs_put_price(s, k, r, d, sigma, t);
        let forward = s * (-d * t).exp() - k * (-r * t).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_volatility() {
        let call = bs_price(OptionType::Call, 100.0, 90.0, 0.05, 0.0, 0.0, 1.0);
        assert_relative_eq!(call, 100.0 - 90.0 * (-0.05_f64).exp(), epsilon = 1e-12);
        assert_eq!(bs_price(OptionType::Put, 100.0, 90.0, 0.05, 0.0, 0.0, 1.0), 0.0);
    }
}
