// tests/integration_test.rs
use mc_pricer::analytics::bs_analytic;
use mc_pricer::linalg::Vector;
use mc_pricer::mc::mc_engine::{build_engine, mc_price_option_gbm, McConfig};
use mc_pricer::mc::payoffs::{AsianCall, Cliquet, EuropeanCall, EuropeanPut, OptionType, UpAndOutBarrier};
use mc_pricer::mc::{flat_discount_factors, MonteCarlo, PayoffKind};
use mc_pricer::models::{BlackScholes, NoiseMode};
use mc_pricer::rng::{seed_rng_from_u64, CountingRng};
use mc_pricer::McError;

const S0: f64 = 100.0;
const K: f64 = 100.0;
const R: f64 = 0.05;
const SIGMA: f64 = 0.2;
const T: f64 = 1.0;

fn independent_model(seed: u64) -> BlackScholes {
    BlackScholes::with_rng(R, SIGMA, 0.0, seed_rng_from_u64(seed))
        .expect("valid parameters")
        .with_noise(NoiseMode::IndependentPerPath)
}

#[test]
fn test_european_call_vs_analytic() {
    let mut engine = MonteCarlo::new(independent_model(42), EuropeanCall::new(K).unwrap());
    let df = Vector::from(vec![(-R * T).exp()]);

    let result = engine.price(&df, S0, T, 100_000, 1).expect("priced");
    let analytic = bs_analytic::bs_call_price(S0, K, R, 0.0, SIGMA, T);

    println!("MC Price: {}  [{}, {}]", result.mean, result.lb, result.ub);
    println!("Analytic Price: {}", analytic);

    assert!(result.lb <= result.mean && result.mean <= result.ub);
    assert!(result.var > 0.0);
    let rel_error = (result.mean - analytic).abs() / analytic;
    assert!(rel_error < 0.03, "Relative error exceeds 3%: {}", rel_error);
    assert!(
        (result.mean - analytic).abs() < 4.0 * result.std_error(),
        "analytic price {} far outside interval [{}, {}]",
        analytic,
        result.lb,
        result.ub
    );
}

#[test]
fn test_put_call_parity() {
    // same seed, so both options see identical paths
    let mut call = MonteCarlo::new(independent_model(7), EuropeanCall::new(K).unwrap());
    let mut put = MonteCarlo::new(independent_model(7), EuropeanPut::new(K).unwrap());
    let df = Vector::from(vec![(-R * T).exp()]);

    let c = call.price(&df, S0, T, 100_000, 1).unwrap();
    let p = put.price(&df, S0, T, 100_000, 1).unwrap();
    assert_eq!(call.cached_paths(), put.cached_paths());

    let forward = S0 - K * (-R * T).exp();
    let diff = c.mean - p.mean;
    println!("C - P = {}, S0 - K e^(-rT) = {}", diff, forward);
    assert!((diff - forward).abs() < 0.3, "parity violated: {} vs {}", diff, forward);

    let analytic_put = bs_analytic::bs_put_price(S0, K, R, 0.0, SIGMA, T);
    assert!((p.mean - analytic_put).abs() / analytic_put < 0.03);
}

#[test]
fn test_single_path_is_insufficient() {
    let model = BlackScholes::with_rng(R, SIGMA, 0.0, CountingRng::new(seed_rng_from_u64(1)))
        .unwrap()
        .with_noise(NoiseMode::IndependentPerPath);
    let mut engine = MonteCarlo::new(model, EuropeanCall::new(K).unwrap());

    let err = engine
        .price(&Vector::from(vec![0.95]), S0, T, 1, 1)
        .unwrap_err();
    assert!(matches!(
        err,
        McError::InsufficientData {
            required: 2,
            available: 1,
            ..
        }
    ));
    assert_eq!(engine.model().rng().draws(), 0);
}

#[test]
fn test_short_discount_factors_consume_no_draws() {
    let model = BlackScholes::with_rng(R, SIGMA, 0.0, CountingRng::new(seed_rng_from_u64(1)))
        .unwrap()
        .with_noise(NoiseMode::IndependentPerPath);
    let mut engine = MonteCarlo::new(model, Cliquet::new(1.0).unwrap());

    let df = flat_discount_factors(R, T, 4).unwrap();
    let err = engine.price(&df, S0, T, 1_000, 12).unwrap_err();
    assert!(matches!(
        err,
        McError::InsufficientData {
            required: 12,
            available: 4,
            ..
        }
    ));
    assert_eq!(engine.model().rng().draws(), 0);
    assert!(engine.cached_paths().is_none());
}

#[test]
fn test_repricing_reuses_paths() {
    let model = BlackScholes::with_rng(R, SIGMA, 0.0, CountingRng::new(seed_rng_from_u64(3)))
        .unwrap()
        .with_noise(NoiseMode::IndependentPerPath);
    let mut engine = MonteCarlo::new(model, EuropeanCall::new(K).unwrap());
    let df = flat_discount_factors(R, T, 4).unwrap();

    let first = engine.price(&df, S0, T, 5_000, 4).unwrap();
    let draws = engine.model().rng().draws();
    let second = engine.price(&df, S0, T, 5_000, 4).unwrap();

    assert_eq!(engine.model().rng().draws(), draws);
    assert_eq!(first, second);

    // a different discount curve reprices the same paths
    let steeper = flat_discount_factors(0.10, T, 4).unwrap();
    let third = engine.price(&steeper, S0, T, 5_000, 4).unwrap();
    assert_eq!(engine.model().rng().draws(), draws);
    assert!(third.mean < first.mean);
}

#[test]
fn test_cliquet_vs_forward_start_sum() {
    // each period is an at-the-money forward-start call worth S0 · C(1, 1, dt)
    let n_steps = 12;
    let dt = T / n_steps as f64;
    let mut engine = MonteCarlo::new(independent_model(11), Cliquet::new(1.0).unwrap());
    let df = flat_discount_factors(R, T, n_steps).unwrap();

    let result = engine.price(&df, S0, T, 20_000, n_steps).unwrap();
    let reference = n_steps as f64 * bs_analytic::bs_call_price(S0, S0, R, 0.0, SIGMA, dt);

    println!("Cliquet MC: {} (se {}), reference {}", result.mean, result.std_error(), reference);
    assert!(
        (result.mean - reference).abs() < 4.0 * result.std_error() + 1e-6,
        "cliquet {} vs reference {}",
        result.mean,
        reference
    );
}

#[test]
fn test_path_dependent_ordering() {
    let n_steps = 12;
    let df = flat_discount_factors(R, T, n_steps).unwrap();

    let mut european = MonteCarlo::new(independent_model(5), EuropeanCall::new(K).unwrap());
    let mut asian = MonteCarlo::new(independent_model(5), AsianCall::new(K).unwrap());
    let mut barrier = MonteCarlo::new(
        independent_model(5),
        UpAndOutBarrier::new(K, 120.0, OptionType::Call).unwrap(),
    );

    let e = european.price(&df, S0, T, 20_000, n_steps).unwrap();
    let a = asian.price(&df, S0, T, 20_000, n_steps).unwrap();
    let b = barrier.price(&df, S0, T, 20_000, n_steps).unwrap();

    println!("European {}, Asian {}, Barrier {}", e.mean, a.mean, b.mean);
    assert!(a.mean < e.mean);
    // knock-out can only remove value path by path
    assert!(b.mean <= e.mean);
    assert!(b.mean > 0.0);
}

#[test]
fn test_mc_price_option_gbm() {
    let cfg = McConfig {
        paths: 50_000,
        noise: NoiseMode::IndependentPerPath,
        payoff: PayoffKind::EuropeanPut { k: 105.0 },
        ..Default::default()
    };
    let result = mc_price_option_gbm(&cfg).expect("Valid configuration");
    let analytic = bs_analytic::bs_price(OptionType::Put, cfg.s0, 105.0, cfg.r, cfg.d, cfg.sigma, cfg.t);
    assert!((result.mean - analytic).abs() < 4.0 * result.std_error());
}

#[test]
fn test_same_seed_reproduces_result() {
    let cfg = McConfig {
        paths: 2_000,
        steps: 6,
        noise: NoiseMode::IndependentPerPath,
        payoff: PayoffKind::AsianCall { k: 95.0 },
        ..Default::default()
    };
    let a = mc_price_option_gbm(&cfg).unwrap();
    let b = mc_price_option_gbm(&cfg).unwrap();
    assert_eq!(a, b);

    let c = mc_price_option_gbm(&McConfig { seed: 1234, ..cfg }).unwrap();
    assert_ne!(a.mean, c.mean);
}

#[test]
fn test_shared_noise_collapses_variance() {
    let cfg = McConfig {
        paths: 1_000,
        steps: 4,
        ..Default::default()
    };
    let mut engine = build_engine(&cfg).unwrap();
    let df = flat_discount_factors(cfg.r, cfg.t, cfg.steps).unwrap();
    let result = engine.price(&df, cfg.s0, cfg.t, cfg.paths, cfg.steps).unwrap();

    assert_eq!(engine.model().noise(), NoiseMode::SharedPerStep);
    assert!(result.var < 1e-18);
    assert!(result.ub - result.lb < 1e-9);
}

#[test]
fn test_invalid_configuration() {
    let cfg = McConfig {
        payoff: PayoffKind::BarrierCallUpAndOut { k: 100.0, h: f64::NAN },
        ..Default::default()
    };
    assert!(matches!(build_engine(&cfg), Err(McError::InvalidParameter { .. })));

    let cfg = McConfig {
        steps: 0,
        ..Default::default()
    };
    assert!(mc_price_option_gbm(&cfg).is_err());
}
