// demos/error_handling_demo.rs
use fair_price::analytics::lognormal::TerminalDistribution;
use fair_price::error::PricerError;
use fair_price::mc::mc_engine::{mc_price_european, McConfig};
use fair_price::mc::payoffs::Payoff;
use fair_price::models::gbm::{simulate_path, PathConfig};

fn main() {
    println!("Error Handling Demo for fair-price");
    println!("==================================\n");

    // Test 1: Negative start price
    println!("1. Testing negative start price...");

    let invalid_cfg = PathConfig {
        s0: -100.0,
        sigma: 0.2,
        t: 1.0,
        dt: 1.0 / 252.0,
        seed: 42,
        demean: true,
    };

    match simulate_path(&invalid_cfg) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Time step larger than the horizon
    println!("\n2. Testing time step larger than the horizon...");

    let coarse_cfg = PathConfig {
        s0: 100.0,
        sigma: 0.2,
        t: 0.001,
        dt: 1.0,
        seed: 42,
        demean: true,
    };

    match simulate_path(&coarse_cfg) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Zero volatility is valid for simulation
    println!("\n3. Testing zero volatility (valid, gives a flat path)...");

    let flat_cfg = PathConfig {
        s0: 100.0,
        sigma: 0.0,
        t: 1.0,
        dt: 1.0 / 252.0,
        seed: 42,
        demean: true,
    };

    match simulate_path(&flat_cfg) {
        Ok(path) => println!(
            "   ✓ Simulated flat path, terminal price = {}",
            path.last().expect("non-empty path")
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 4: Invalid Monte Carlo configuration
    println!("\n4. Testing invalid Monte Carlo configuration...");

    let invalid_mc_config = McConfig {
        paths: 0,
        steps: 1,
        s0: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        seed: 42,
        use_antithetic: true,
        use_control_variate: true,
        payoff: Payoff::EuropeanCall { k: 100.0 },
        greeks: fair_price::mc::mc_engine::GreeksConfig::NONE,
        epsilon: None,
    };

    match mc_price_european(&invalid_mc_config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Invalid epsilon
    println!("\n5. Testing invalid epsilon for finite differences...");

    let invalid_epsilon_config = McConfig {
        paths: 10000,
        steps: 1,
        s0: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        seed: 42,
        use_antithetic: true,
        use_control_variate: true,
        payoff: Payoff::EuropeanCall { k: 100.0 },
        greeks: fair_price::mc::mc_engine::GreeksConfig::GAMMA,
        epsilon: Some(50.0),
    };

    match mc_price_european(&invalid_epsilon_config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Valid configuration should work
    println!("\n6. Testing valid configuration...");

    let valid_config = McConfig {
        paths: 10000,
        steps: 1,
        s0: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        seed: 42,
        use_antithetic: true,
        use_control_variate: true,
        payoff: Payoff::EuropeanCall { k: 100.0 },
        greeks: fair_price::mc::mc_engine::GreeksConfig::NONE,
        epsilon: None,
    };

    match mc_price_european(&valid_config) {
        Ok((price, variance)) => println!(
            "   ✓ Success: Price = {:.4}, Variance = {:.6}",
            price, variance
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 7: Error type matching
    println!("\n7. Testing error type matching...");

    match TerminalDistribution::new(100.0, 0.05, -0.2, 1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(PricerError::InvalidParameters {
            parameter,
            value,
            constraint,
        }) => {
            println!(
                "   ✓ Caught InvalidParameters: {} = {} ({})",
                parameter, value, constraint
            );
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
