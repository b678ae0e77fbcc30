// demos/charts_demo.rs
use fair_price::charts;
use fair_price::mc::mc_engine::{GreeksConfig, McConfig};
use fair_price::mc::payoffs::Payoff;
use fair_price::models::gbm::{simulate_paths, PathConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Rendering fair-price charts\n");

    std::fs::create_dir_all("charts")?;

    let s0 = 100.0;
    let k = 105.0;
    let r = 0.05;
    let sigma = 0.2;
    let t = 1.0;

    let path_cfg = PathConfig {
        s0,
        sigma,
        t,
        dt: 1.0 / 252.0,
        seed: 2024,
        demean: true,
    };

    // A small ensemble keeps the overlay readable
    let ensemble = simulate_paths(&path_cfg, 30)?;
    charts::plot_price_paths(&ensemble, t, Some(k), "charts/price_paths.png")?;

    charts::plot_terminal_distribution(&path_cfg, 20_000, k, "charts/terminal_distribution.png")?;

    charts::plot_call_value_vs_spot(k, r, sigma, t, "charts/call_value_vs_spot.png")?;

    let mc_cfg = McConfig {
        paths: 1_000,
        steps: 1,
        s0,
        r,
        sigma,
        t,
        seed: 42,
        use_antithetic: true,
        use_control_variate: false,
        payoff: Payoff::EuropeanCall { k },
        greeks: GreeksConfig::NONE,
        epsilon: None,
    };
    let path_counts = [1_000, 5_000, 10_000, 50_000, 100_000, 500_000];
    charts::plot_mc_convergence(&mc_cfg, &path_counts, "charts/mc_convergence.png")?;

    println!("\nAll charts rendered into charts/");
    Ok(())
}
