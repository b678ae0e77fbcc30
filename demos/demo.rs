// demos/demo.rs
use fair_price::analytics::bs_analytic;
use fair_price::analytics::lognormal::TerminalDistribution;
use fair_price::math_utils::Timer;
use fair_price::mc::mc_engine::{mc_greeks, mc_price_european, GreeksConfig, McConfig};
use fair_price::mc::payoffs::Payoff;
use fair_price::models::gbm::{pin_path_endpoint, simulate_path, simulate_paths, PathConfig};
use fair_price::output;

fn main() {
    println!("Running fair-price Demo\n");

    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.2;
    let t = 1.0;

    // --- Path Simulation ---
    println!("--- Path Simulation ---");

    let path_cfg = PathConfig {
        s0,
        sigma,
        t,
        dt: 1.0 / 252.0,
        seed: 12345,
        demean: true,
    };

    let mut timer = Timer::new();
    timer.start();
    let n_paths = 1_000;
    let paths = simulate_paths(&path_cfg, n_paths).expect("Valid configuration");
    let sim_time = timer.elapsed_ms();

    let mean_terminal = paths
        .iter()
        .map(|p| *p.last().expect("non-empty path"))
        .sum::<f64>()
        / n_paths as f64;
    println!(
        "Simulated {} paths of {} points in {} ms",
        n_paths,
        path_cfg.n_points(),
        sim_time
    );
    println!("Mean terminal price: {:.4} (de-meaned, expect ~{})", mean_terminal, s0);

    let flat_cfg = PathConfig {
        sigma: 0.0,
        ..path_cfg
    };
    let flat = simulate_path(&flat_cfg).expect("Valid configuration");
    println!(
        "Zero volatility path: starts at {}, ends at {}\n",
        flat.first().expect("non-empty path"),
        flat.last().expect("non-empty path")
    );

    // --- Analytic Pricing ---
    println!("--- Analytic Pricing ---");

    let call = bs_analytic::bs_call_price(s0, k, r, sigma, t);
    let put = bs_analytic::bs_put_price(s0, k, r, sigma, t);
    println!("Black-Scholes Call: {:.6}", call);
    println!("Black-Scholes Put:  {:.6}", put);
    println!(
        "Put-Call Parity Gap: {:.2e}",
        (call - put - (s0 - k * bs_analytic::discount_factor(r, t))).abs()
    );

    let law = TerminalDistribution::new(s0, r, sigma, t).expect("Valid parameters");
    println!("P(S_T > K) under the risk-neutral law: {:.4}", law.prob_above(k));
    println!("E[S_T]: {:.4}\n", law.mean());

    // --- Monte Carlo Pricing ---
    println!("--- Monte Carlo Pricing ---");

    let cfg = McConfig {
        paths: 100_000,
        steps: 1,
        s0,
        r,
        sigma,
        t,
        seed: 12345,
        use_antithetic: true,
        use_control_variate: true,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::DELTA | GreeksConfig::VEGA | GreeksConfig::RHO | GreeksConfig::GAMMA,
        epsilon: Some(0.001 * s0),
    };

    timer.start();
    let (mc_price, variance) = mc_price_european(&cfg).expect("Valid configuration");
    let price_time = timer.elapsed_ms();
    let abs_error_price = (mc_price - call).abs();
    println!("MC Price (European Call): {:.6} ({} ms)", mc_price, price_time);
    println!("Standard Error: {:.6}", variance.sqrt());
    println!("Absolute Error vs Analytic: {:.6}", abs_error_price);
    println!("Relative Error vs Analytic: {:.6}\n", abs_error_price / call);

    // --- Monte Carlo Greeks ---
    println!("--- Monte Carlo Greeks ---");

    timer.start();
    let report = mc_greeks(&cfg).expect("Valid configuration");
    let greeks_time = timer.elapsed_ms();

    let analytic_delta = bs_analytic::bs_call_delta(s0, k, r, sigma, t);
    let analytic_gamma = bs_analytic::bs_call_gamma(s0, k, r, sigma, t);
    let analytic_vega = bs_analytic::bs_call_vega(s0, k, r, sigma, t);
    let analytic_rho = bs_analytic::bs_call_rho(s0, k, r, sigma, t);

    let mc_delta = report.delta.expect("DELTA flag was set");
    let mc_gamma = report.gamma.expect("GAMMA flag was set");
    let mc_vega = report.vega.expect("VEGA flag was set");
    let mc_rho = report.rho.expect("RHO flag was set");

    println!("Computed 4 Greeks in {} ms", greeks_time);
    println!("Delta: MC = {:.6}, Analytic = {:.6}", mc_delta, analytic_delta);
    println!("Gamma: MC = {:.6}, Analytic = {:.6}", mc_gamma, analytic_gamma);
    println!("Vega:  MC = {:.6}, Analytic = {:.6}", mc_vega, analytic_vega);
    println!("Rho:   MC = {:.6}, Analytic = {:.6}\n", mc_rho, analytic_rho);

    // --- Path Pinning ---
    println!("--- Path Pinning ---");

    let pinned = pin_path_endpoint(&paths[0], law.mean());
    println!(
        "Pinned first path: starts at {:.4}, ends at {:.4} (target {:.4})\n",
        pinned.first().expect("non-empty path"),
        pinned.last().expect("non-empty path"),
        law.mean()
    );

    // --- CSV Output ---
    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Error creating results directory: {}", e);
    }

    let paths_csv_filename = "results/paths.csv";
    match output::write_paths_to_csv(paths_csv_filename, &paths[..50], path_cfg.dt) {
        Ok(_) => println!("Path data written to {}", paths_csv_filename),
        Err(e) => eprintln!("Error writing path data: {}", e),
    }

    // Collect summary data into owned Strings
    let mc_price_str = mc_price.to_string();
    let analytic_price_str = call.to_string();
    let abs_error_price_str = abs_error_price.to_string();
    let price_time_str = price_time.to_string();
    let mc_delta_str = mc_delta.to_string();
    let analytic_delta_str = analytic_delta.to_string();
    let mc_gamma_str = mc_gamma.to_string();
    let analytic_gamma_str = analytic_gamma.to_string();
    let mc_vega_str = mc_vega.to_string();
    let analytic_vega_str = analytic_vega.to_string();
    let mc_rho_str = mc_rho.to_string();
    let analytic_rho_str = analytic_rho.to_string();
    let prob_above_str = law.prob_above(k).to_string();

    let summary_data = vec![
        ("mc_price_european", mc_price_str.as_str()),
        ("analytic_price_european", &analytic_price_str),
        ("abs_error_price", &abs_error_price_str),
        ("price_time_ms", &price_time_str),
        ("mc_delta", &mc_delta_str),
        ("analytic_delta", &analytic_delta_str),
        ("mc_gamma", &mc_gamma_str),
        ("analytic_gamma", &analytic_gamma_str),
        ("mc_vega", &mc_vega_str),
        ("analytic_vega", &analytic_vega_str),
        ("mc_rho", &mc_rho_str),
        ("analytic_rho", &analytic_rho_str),
        ("prob_terminal_above_strike", &prob_above_str),
    ];

    let summary_csv_filename = "results/summary.csv";
    match output::write_summary_to_csv(summary_csv_filename, &summary_data) {
        Ok(_) => println!("Summary data written to {}", summary_csv_filename),
        Err(e) => eprintln!("Error writing summary data: {}", e),
    }
}
