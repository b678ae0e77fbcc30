// tests/integration_test.rs
use fair_price::analytics::bs_analytic;
use fair_price::mc::mc_engine::{mc_price_european, McConfig};
use fair_price::mc::payoffs::Payoff;

#[test]
fn test_bs_mc_vs_analytic() {
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.01;
    let sigma = 0.2;
    let t = 1.0;

    let cfg_with_cv = McConfig {
        paths: 1_000_000,
        seed: 42,
        s0,
        r,
        sigma,
        t,
        use_control_variate: true,
        payoff: Payoff::EuropeanCall { k },
        ..Default::default()
    };

    let (mc_price_with_cv, variance_with_cv) =
        mc_price_european(&cfg_with_cv).expect("Valid configuration");

    // Same draws without the control variate, to measure the reduction
    let cfg_without_cv = McConfig {
        use_control_variate: false,
        ..cfg_with_cv.clone()
    };
    let (mc_price_without_cv, variance_without_cv) =
        mc_price_european(&cfg_without_cv).expect("Valid configuration");

    let analytic_price = bs_analytic::bs_call_price(s0, k, r, sigma, t);

    let abs_error_with_cv = (mc_price_with_cv - analytic_price).abs();
    let abs_error_without_cv = (mc_price_without_cv - analytic_price).abs();
    let vrf = variance_without_cv / variance_with_cv;

    println!("\nMC Price (with CV): {}", mc_price_with_cv);
    println!("MC Price (without CV): {}", mc_price_without_cv);
    println!("Analytic Price: {}", analytic_price);
    println!("Absolute Error (with CV): {}", abs_error_with_cv);
    println!("Absolute Error (without CV): {}", abs_error_without_cv);
    println!("Variance with CV: {}", variance_with_cv);
    println!("Variance without CV: {}", variance_without_cv);
    println!("Variance Reduction Factor: {}", vrf);

    let rel_error = abs_error_with_cv / analytic_price;
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
    assert!(
        vrf > 1.2,
        "Variance Reduction Factor ({}) is not greater than 1.2",
        vrf
    );
}

#[test]
fn test_mc_put_vs_analytic() {
    let s0 = 100.0;
    let k = 105.0;
    let r = 0.03;
    let sigma = 0.25;
    let t = 0.5;

    let cfg = McConfig {
        paths: 500_000,
        seed: 43,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanPut { k },
        ..Default::default()
    };

    let (mc_price, variance) = mc_price_european(&cfg).expect("Valid configuration");
    let analytic_price = bs_analytic::bs_put_price(s0, k, r, sigma, t);

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;

    println!("\nMC Put Price: {} (stderr {})", mc_price, variance.sqrt());
    println!("Analytic Put Price: {}", analytic_price);
    println!("Relative Error: {}", rel_error);

    assert!(
        rel_error < 0.01,
        "Relative error for the put exceeds 1%: {}",
        rel_error
    );
}

#[test]
fn test_antithetic_reduces_variance() {
    let cfg_plain = McConfig {
        paths: 1_000_000,
        seed: 7,
        use_antithetic: false,
        use_control_variate: false,
        ..Default::default()
    };
    let cfg_antithetic = McConfig {
        use_antithetic: true,
        ..cfg_plain.clone()
    };

    let (_, variance_plain) = mc_price_european(&cfg_plain).expect("Valid configuration");
    let (_, variance_antithetic) =
        mc_price_european(&cfg_antithetic).expect("Valid configuration");

    println!("\nVariance (plain): {}", variance_plain);
    println!("Variance (antithetic): {}", variance_antithetic);

    assert!(
        variance_antithetic < variance_plain,
        "Antithetic pairing should shrink the variance: {} >= {}",
        variance_antithetic,
        variance_plain
    );
}

#[test]
fn test_multi_step_price_agrees_with_single_step() {
    // The exact GBM update has no discretization error, so stepping
    // daily must price the same option as one jump to expiry, up to
    // Monte Carlo noise
    let cfg_single = McConfig {
        paths: 200_000,
        steps: 1,
        seed: 11,
        ..Default::default()
    };
    let cfg_daily = McConfig {
        steps: 252,
        ..cfg_single.clone()
    };

    let (price_single, _) = mc_price_european(&cfg_single).expect("Valid configuration");
    let (price_daily, _) = mc_price_european(&cfg_daily).expect("Valid configuration");

    let gap = (price_single - price_daily).abs() / price_single;

    println!("\nSingle-step price: {}", price_single);
    println!("Daily-step price: {}", price_daily);
    println!("Relative gap: {}", gap);

    assert!(gap < 0.02, "Step count changed the price by {}", gap);
}

#[test]
fn test_invalid_configs_return_errors() {
    let zero_paths = McConfig {
        paths: 0,
        ..Default::default()
    };
    assert!(mc_price_european(&zero_paths).is_err());

    let zero_vol = McConfig {
        sigma: 0.0,
        ..Default::default()
    };
    assert!(mc_price_european(&zero_vol).is_err());

    let negative_horizon = McConfig {
        t: -1.0,
        ..Default::default()
    };
    assert!(mc_price_european(&negative_horizon).is_err());

    let zero_strike = McConfig {
        payoff: Payoff::EuropeanCall { k: 0.0 },
        ..Default::default()
    };
    assert!(mc_price_european(&zero_strike).is_err());

    let oversized_epsilon = McConfig {
        epsilon: Some(50.0),
        ..Default::default()
    };
    assert!(mc_price_european(&oversized_epsilon).is_err());
}
