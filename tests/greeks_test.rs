// tests/greeks_test.rs
use fair_price::analytics::bs_analytic;
use fair_price::mc::mc_engine::{
    mc_delta_european_call_pathwise, mc_gamma_european_call_finite_diff, mc_greeks,
    mc_rho_european_call_pathwise, mc_vega_european_call_pathwise, GreeksConfig, McConfig,
};
use fair_price::mc::payoffs::Payoff;

#[test]
fn test_mc_delta_pathwise_vs_analytic() {
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.01;
    let sigma = 0.2;
    let t = 1.0;

    let cfg = McConfig {
        paths: 1_000_000,
        seed: 42,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanCall { k },
        ..Default::default()
    };

    let mc_delta = mc_delta_european_call_pathwise(&cfg);
    let analytic_delta = bs_analytic::bs_call_delta(s0, k, r, sigma, t);

    let abs_error = (mc_delta - analytic_delta).abs();
    let rel_error = abs_error / analytic_delta;

    println!("\nMC Delta (Pathwise): {}", mc_delta);
    println!("Analytic Delta: {}", analytic_delta);
    println!("Absolute Error: {}", abs_error);
    println!("Relative Error: {}", rel_error);

    assert!(
        rel_error < 0.01,
        "Relative error for Delta exceeds 1%: {}",
        rel_error
    );
}

#[test]
fn test_mc_vega_pathwise_vs_analytic() {
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.20;
    let t = 1.0;

    let cfg = McConfig {
        paths: 500_000,
        seed: 42,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::VEGA,
        use_antithetic: true,
        use_control_variate: false,
        ..Default::default()
    };

    let mc_vega = mc_vega_european_call_pathwise(&cfg);
    let analytic_vega = bs_analytic::bs_call_vega(s0, k, r, sigma, t);

    let abs_error = (mc_vega - analytic_vega).abs();
    let rel_error = abs_error / analytic_vega;

    println!("\n=== MC Vega Test Results ===");
    println!("MC Vega (Pathwise): {}", mc_vega);
    println!("Analytic Vega: {}", analytic_vega);
    println!("Absolute Error: {}", abs_error);
    println!("Relative Error: {:.4}%", rel_error * 100.0);

    assert!(
        rel_error < 0.02,
        "Relative error for Vega exceeds 2%: {}",
        rel_error
    );
}

#[test]
fn test_mc_rho_pathwise_vs_analytic() {
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.20;
    let t = 1.0;

    let cfg = McConfig {
        paths: 500_000,
        seed: 42,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::RHO,
        use_antithetic: true,
        use_control_variate: false,
        ..Default::default()
    };

    let mc_rho = mc_rho_european_call_pathwise(&cfg);
    let analytic_rho = bs_analytic::bs_call_rho(s0, k, r, sigma, t);

    let abs_error = (mc_rho - analytic_rho).abs();
    let rel_error = abs_error / analytic_rho;

    println!("\n=== MC Rho Test Results ===");
    println!("MC Rho (Pathwise): {}", mc_rho);
    println!("Analytic Rho: {}", analytic_rho);
    println!("Absolute Error: {}", abs_error);
    println!("Relative Error: {:.4}%", rel_error * 100.0);

    assert!(
        rel_error < 0.02,
        "Relative error for Rho exceeds 2%: {}",
        rel_error
    );
}

#[test]
fn test_mc_gamma_finite_diff_vs_analytic() {
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.20;
    let t = 1.0;

    let cfg = McConfig {
        paths: 500_000,
        seed: 42,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::GAMMA,
        use_antithetic: true,
        use_control_variate: false,
        epsilon: Some(0.001 * s0),
        ..Default::default()
    };

    let mc_gamma = mc_gamma_european_call_finite_diff(&cfg);
    let analytic_gamma = bs_analytic::bs_call_gamma(s0, k, r, sigma, t);

    let abs_error = (mc_gamma - analytic_gamma).abs();
    let rel_error = abs_error / analytic_gamma;

    println!("\n=== MC Gamma Test Results ===");
    println!("MC Gamma (Finite Diff): {}", mc_gamma);
    println!("Analytic Gamma: {}", analytic_gamma);
    println!("Absolute Error: {}", abs_error);
    println!("Relative Error: {:.4}%", rel_error * 100.0);

    assert!(
        rel_error < 0.05,
        "Relative error for Gamma exceeds 5%: {}",
        rel_error
    );
}

#[test]
fn test_mc_greeks_respects_flags() {
    let cfg = McConfig {
        paths: 200_000,
        seed: 42,
        greeks: GreeksConfig::DELTA | GreeksConfig::VEGA,
        use_control_variate: false,
        epsilon: Some(0.1),
        ..Default::default()
    };

    let report = mc_greeks(&cfg).expect("Valid configuration");

    assert!(report.delta.is_some(), "DELTA flag was set");
    assert!(report.vega.is_some(), "VEGA flag was set");
    assert!(report.gamma.is_none(), "GAMMA flag was not set");
    assert!(report.rho.is_none(), "RHO flag was not set");

    let analytic_delta =
        bs_analytic::bs_call_delta(cfg.s0, 100.0, cfg.r, cfg.sigma, cfg.t);
    let delta = report.delta.unwrap();
    let rel_error = (delta - analytic_delta).abs() / analytic_delta;
    assert!(
        rel_error < 0.05,
        "Flag-dispatched Delta too far off: {}",
        rel_error
    );

    let empty = mc_greeks(&McConfig {
        greeks: GreeksConfig::NONE,
        paths: 1_000,
        ..Default::default()
    })
    .expect("Valid configuration");
    assert!(empty.delta.is_none());
    assert!(empty.gamma.is_none());
    assert!(empty.vega.is_none());
    assert!(empty.rho.is_none());
}

#[test]
fn test_mc_greeks_rejects_invalid_config() {
    let cfg = McConfig {
        paths: 0,
        greeks: GreeksConfig::DELTA,
        ..Default::default()
    };
    assert!(mc_greeks(&cfg).is_err());
}

#[test]
#[ignore]
fn test_gamma_epsilon_sweep() {
    // Gamma accuracy across bump sizes; run with --ignored to regenerate
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.20;
    let t = 1.0;
    let n_paths = 1_000_000;

    let epsilons = vec![
        0.0001 * s0,
        0.0005 * s0,
        0.001 * s0,
        0.002 * s0,
        0.005 * s0,
        0.01 * s0,
    ];

    let analytic_gamma = bs_analytic::bs_call_gamma(s0, k, r, sigma, t);

    println!("\n=== Gamma Epsilon Sweep Results ===");
    println!("Analytic Gamma: {:.6}", analytic_gamma);
    println!("Paths: {}", n_paths);
    println!("\nEpsilon\t\tMC Gamma\tAbs Error\tRel Error %");
    println!("{}", "-".repeat(60));

    for eps in epsilons {
        let cfg = McConfig {
            paths: n_paths,
            seed: 42,
            s0,
            r,
            sigma,
            t,
            payoff: Payoff::EuropeanCall { k },
            greeks: GreeksConfig::GAMMA,
            use_antithetic: true,
            use_control_variate: false,
            epsilon: Some(eps),
            ..Default::default()
        };

        let mc_gamma = mc_gamma_european_call_finite_diff(&cfg);
        let abs_error = (mc_gamma - analytic_gamma).abs();
        let rel_error = abs_error / analytic_gamma;

        println!(
            "{:.4}\t\t{:.6}\t{:.6}\t{:.4}",
            eps,
            mc_gamma,
            abs_error,
            rel_error * 100.0
        );
    }
}

#[test]
#[ignore]
fn test_mc_vega_rho_comprehensive_ci() {
    // Confidence-interval check over independent runs (slow)
    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.20;
    let t = 1.0;
    let n_paths = 2_000_000;
    let n_runs = 10;

    let cfg = McConfig {
        paths: n_paths,
        seed: 12345,
        s0,
        r,
        sigma,
        t,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::VEGA | GreeksConfig::RHO,
        use_antithetic: true,
        use_control_variate: false,
        ..Default::default()
    };

    let mut vega_results = Vec::with_capacity(n_runs);
    let mut rho_results = Vec::with_capacity(n_runs);

    for i in 0..n_runs {
        let mut cfg_run = cfg.clone();
        // Per-path seeds are seed..seed+paths, so runs must be spaced a
        // full path count apart to stay independent
        cfg_run.seed = cfg.seed + (i * n_paths) as u64;

        vega_results.push(mc_vega_european_call_pathwise(&cfg_run));
        rho_results.push(mc_rho_european_call_pathwise(&cfg_run));
    }

    let vega_mean = vega_results.iter().sum::<f64>() / n_runs as f64;
    let vega_std = (vega_results
        .iter()
        .map(|x| (x - vega_mean).powi(2))
        .sum::<f64>()
        / (n_runs - 1) as f64)
        .sqrt();
    let vega_stderr = vega_std / (n_runs as f64).sqrt();
    let vega_ci_95_lo = vega_mean - 1.96 * vega_stderr;
    let vega_ci_95_hi = vega_mean + 1.96 * vega_stderr;

    let rho_mean = rho_results.iter().sum::<f64>() / n_runs as f64;
    let rho_std = (rho_results
        .iter()
        .map(|x| (x - rho_mean).powi(2))
        .sum::<f64>()
        / (n_runs - 1) as f64)
        .sqrt();
    let rho_stderr = rho_std / (n_runs as f64).sqrt();
    let rho_ci_95_lo = rho_mean - 1.96 * rho_stderr;
    let rho_ci_95_hi = rho_mean + 1.96 * rho_stderr;

    let analytic_vega = bs_analytic::bs_call_vega(s0, k, r, sigma, t);
    let analytic_rho = bs_analytic::bs_call_rho(s0, k, r, sigma, t);

    println!(
        "\n=== Comprehensive MC Greeks Test Results ({} runs, {} paths) ===",
        n_runs, n_paths
    );
    println!("Vega:");
    println!("  MC Mean: {:.6} ± {:.6} (stderr)", vega_mean, vega_stderr);
    println!("  95% CI: [{:.6}, {:.6}]", vega_ci_95_lo, vega_ci_95_hi);
    println!("  Analytic: {:.6}", analytic_vega);
    println!(
        "  Relative Error: {:.4}%",
        (vega_mean - analytic_vega).abs() / analytic_vega * 100.0
    );

    println!("Rho:");
    println!("  MC Mean: {:.6} ± {:.6} (stderr)", rho_mean, rho_stderr);
    println!("  95% CI: [{:.6}, {:.6}]", rho_ci_95_lo, rho_ci_95_hi);
    println!("  Analytic: {:.6}", analytic_rho);
    println!(
        "  Relative Error: {:.4}%",
        (rho_mean - analytic_rho).abs() / analytic_rho * 100.0
    );

    assert!(
        analytic_vega >= vega_ci_95_lo && analytic_vega <= vega_ci_95_hi,
        "Analytic Vega {} not in 95% CI [{}, {}]",
        analytic_vega,
        vega_ci_95_lo,
        vega_ci_95_hi
    );
    assert!(
        analytic_rho >= rho_ci_95_lo && analytic_rho <= rho_ci_95_hi,
        "Analytic Rho {} not in 95% CI [{}, {}]",
        analytic_rho,
        rho_ci_95_lo,
        rho_ci_95_hi
    );
}
