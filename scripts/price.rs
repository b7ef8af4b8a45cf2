// scripts/price.rs
//! `mc-price`: price one option by Monte Carlo under Black-Scholes
//!
//! ```text
//! mc-price --option call --strike 100 --paths 100000 --independent-noise
//! RUST_LOG=mc_pricer=debug mc-price --option cliquet --steps 12 --json
//! ```

use clap::{Parser, ValueEnum};
use mc_pricer::analytics::bs_price;
use mc_pricer::math_utils::Timer;
use mc_pricer::mc::payoffs::Payoff;
use mc_pricer::mc::{build_engine, flat_discount_factors, McConfig, PayoffKind, PricingResult};
use mc_pricer::models::NoiseMode;
use mc_pricer::output;
use mc_pricer::McResult;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OptionArg {
    Call,
    Put,
    Cliquet,
    Asian,
    BarrierCall,
    BarrierPut,
}

/// Monte Carlo option pricer
#[derive(Parser, Debug)]
#[command(name = "mc-price")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of simulated paths
    #[arg(long, default_value_t = 100_000)]
    paths: usize,

    /// Time steps per path
    #[arg(long, default_value_t = 1)]
    steps: usize,

    /// Spot price S0
    #[arg(long, default_value_t = 100.0)]
    spot: f64,

    /// Strike K
    #[arg(long, default_value_t = 100.0)]
    strike: f64,

    /// Risk-free rate
    #[arg(long, default_value_t = 0.05)]
    rate: f64,

    /// Volatility
    #[arg(long, default_value_t = 0.2)]
    sigma: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    dividend: f64,

    /// Maturity in years
    #[arg(long, default_value_t = 1.0)]
    maturity: f64,

    /// Seed of the model's random generator
    #[arg(long, default_value_t = mc_pricer::rng::DEFAULT_SEED)]
    seed: u64,

    #[arg(long, value_enum, default_value = "call")]
    option: OptionArg,

    /// Knock-out level of barrier options
    #[arg(long, required_if_eq_any([("option", "barrier-call"), ("option", "barrier-put")]))]
    barrier: Option<f64>,

    /// Participation rate of the cliquet
    #[arg(long, default_value_t = 1.0)]
    participation: f64,

    /// Draw a separate normal for every path at every step
    #[arg(long)]
    independent_noise: bool,

    /// Confidence level of the reported interval
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the simulated paths as CSV
    #[arg(long)]
    dump_paths: Option<PathBuf>,

    /// Write a key,value summary of the result
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    fn payoff_kind(&self) -> PayoffKind {
        let k = self.strike;
        // required by clap for barrier options
        let h = self.barrier.unwrap_or(f64::NAN);
        match self.option {
            OptionArg::Call => PayoffKind::EuropeanCall { k },
            OptionArg::Put => PayoffKind::EuropeanPut { k },
            OptionArg::Cliquet => PayoffKind::Cliquet {
                l: self.participation,
            },
            OptionArg::Asian => PayoffKind::AsianCall { k },
            OptionArg::BarrierCall => PayoffKind::BarrierCallUpAndOut { k, h },
            OptionArg::BarrierPut => PayoffKind::BarrierPutUpAndOut { k, h },
        }
    }

    fn config(&self) -> McConfig {
        McConfig {
            paths: self.paths,
            steps: self.steps,
            s0: self.spot,
            r: self.rate,
            sigma: self.sigma,
            d: self.dividend,
            t: self.maturity,
            seed: self.seed,
            noise: if self.independent_noise {
                NoiseMode::IndependentPerPath
            } else {
                NoiseMode::SharedPerStep
            },
            confidence: self.confidence,
            payoff: self.payoff_kind(),
        }
    }
}

fn print_table(label: &str, result: &PricingResult, analytic: Option<f64>, elapsed_ms: f64) {
    println!("{}", label);
    println!("{}", "=".repeat(label.len()));
    println!("  paths      : {}", result.n_sim);
    println!("  price      : {:.6}", result.mean);
    println!(
        "  {:>4.1}% CI   : [{:.6}, {:.6}]",
        result.confidence * 100.0,
        result.lb,
        result.ub
    );
    println!("  variance   : {:.6}", result.var);
    println!("  std error  : {:.6}", result.std_error());
    if let Some(price) = analytic {
        println!("  analytic   : {:.6}", price);
        println!("  abs error  : {:.6}", (result.mean - price).abs());
    }
    println!("  time       : {:.2} ms", elapsed_ms);
}

fn run(cli: &Cli) -> McResult<()> {
    let cfg = cli.config();
    let mut engine = build_engine(&cfg)?;
    let discount_factors = flat_discount_factors(cfg.r, cfg.t, cfg.steps)?;

    let timer = Timer::new();
    let result = engine.price(&discount_factors, cfg.s0, cfg.t, cfg.paths, cfg.steps)?;
    let elapsed_ms = timer.elapsed_ms();

    let option: &dyn Payoff = &**engine.option();
    let label = option.to_string();
    info!(option = %label, elapsed_ms, "pricing finished");

    let analytic = cfg
        .payoff
        .european_strike()
        .map(|(option_type, k)| bs_price(option_type, cfg.s0, k, cfg.r, cfg.d, cfg.sigma, cfg.t));

    if cli.json {
        let report = json!({
            "option": option.name(),
            "params": option.params().into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "model": engine.model().to_string(),
            "steps": cfg.steps,
            "result": result,
            "std_error": result.std_error(),
            "analytic": analytic,
            "elapsed_ms": elapsed_ms,
        });
        println!("{}", report);
    } else {
        println!("{}\n", engine.model());
        print_table(&label, &result, analytic, elapsed_ms);
    }

    if let Some(path) = &cli.dump_paths {
        if let Some(paths) = engine.cached_paths() {
            output::write_paths_to_csv(path, paths)?;
            info!(file = %path.display(), "paths written");
        }
    }
    if let Some(path) = &cli.summary {
        output::write_summary_to_csv(path, &label, &result)?;
        info!(file = %path.display(), "summary written");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "pricing failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
