// demos/error_handling_demo.rs
use mc_pricer::linalg::{Matrix, Vector};
use mc_pricer::mc::mc_engine::{mc_price_option_gbm, McConfig};
use mc_pricer::mc::payoffs::{EuropeanCall, PayoffKind};
use mc_pricer::mc::MonteCarlo;
use mc_pricer::models::{BlackScholes, NoiseMode};
use mc_pricer::output::read_matrix_text;
use mc_pricer::McError;

fn main() {
    println!("Error Handling Demo for mc-pricer");
    println!("=================================\n");

    // 1: invalid model parameters
    println!("1. Testing negative volatility...");
    match BlackScholes::new(0.05, -0.2, 0.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 2: vector length mismatch
    println!("\n2. Testing vector addition with mismatched lengths...");
    let a = Vector::from(vec![1.0, 2.0, 3.0]);
    let b = Vector::from(vec![1.0, 2.0]);
    match a.add_vector(&b) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 3: arithmetic on a non-numeric element type
    println!("\n3. Testing arithmetic on boolean vectors...");
    let flags = Vector::from(vec![true, false]);
    match flags.add_vector(&flags) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 4: out-of-range column
    println!("\n4. Testing column access beyond the matrix...");
    let m = Matrix::new(2, 2, 0.0);
    match m.col(5) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 5: pricing with a single path
    println!("\n5. Testing pricing with one path...");
    let model = BlackScholes::new(0.05, 0.2, 0.0)
        .map(|m| m.with_noise(NoiseMode::IndependentPerPath));
    let call = EuropeanCall::new(100.0);
    if let (Ok(model), Ok(call)) = (model, call) {
        let mut engine = MonteCarlo::new(model, call);
        let df = Vector::from(vec![(-0.05_f64).exp()]);
        match engine.price(&df, 100.0, 1.0, 1, 1) {
            Ok(_) => println!("   Unexpected: Should have failed!"),
            Err(e) => println!("   ✓ Caught error: {}", e),
        }

        // 6: too few discount factors
        println!("\n6. Testing pricing with too few discount factors...");
        match engine.price(&df, 100.0, 1.0, 1_000, 12) {
            Ok(_) => println!("   Unexpected: Should have failed!"),
            Err(e) => println!("   ✓ Caught error: {}", e),
        }
    }

    // 7: malformed matrix text
    println!("\n7. Testing malformed matrix text...");
    match read_matrix_text::<f64, _>("2 2\n1 2\n3 oops\n".as_bytes()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // 8: valid configuration
    println!("\n8. Testing valid configuration...");
    let valid_config = McConfig {
        paths: 10_000,
        noise: NoiseMode::IndependentPerPath,
        payoff: PayoffKind::EuropeanCall { k: 100.0 },
        ..Default::default()
    };
    match mc_price_option_gbm(&valid_config) {
        Ok(result) => println!(
            "   ✓ Success: Price = {:.4}, CI = [{:.4}, {:.4}]",
            result.mean, result.lb, result.ub
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // 9: matching on the error variant
    println!("\n9. Testing error type matching...");
    let bad_config = McConfig {
        t: -1.0,
        ..Default::default()
    };
    match mc_price_option_gbm(&bad_config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(McError::InvalidParameter {
            parameter,
            value,
            constraint,
        }) => {
            println!(
                "   ✓ Caught InvalidParameter: {} = {} ({})",
                parameter, value, constraint
            );
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
}
