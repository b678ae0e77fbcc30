// scripts/benchmark.rs
use fair_price::analytics::bs_analytic;
use fair_price::math_utils::Timer;
use fair_price::mc::mc_engine::{
    mc_delta_european_call_pathwise, mc_gamma_european_call_finite_diff, mc_price_european,
    GreeksConfig, McConfig,
};
use fair_price::mc::payoffs::Payoff;
use fair_price::models::gbm::{simulate_paths, PathConfig};
use std::env;
use std::fs::File;
use std::io::Write;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    memory_gb: f64,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

fn command_stdout(cmd: &str, args: &[&str]) -> Option<String> {
    Command::new(cmd)
        .args(args)
        .output()
        .ok()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(target_os = "linux")]
fn proc_field(path: &str, key: &str) -> Option<String> {
    std::fs::read_to_string(path).ok().and_then(|content| {
        content
            .lines()
            .find(|line| line.starts_with(key))
            .and_then(|line| line.split(':').nth(1))
            .map(|s| s.trim().to_string())
    })
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::cpu_model(),
            cpu_cores: num_cpus::get(),
            memory_gb: Self::memory_gb(),
            rust_version: command_stdout("rustc", &["--version"])
                .unwrap_or_else(|| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn cpu_model() -> String {
        #[cfg(target_os = "linux")]
        let model = proc_field("/proc/cpuinfo", "model name");

        #[cfg(target_os = "macos")]
        let model = command_stdout("sysctl", &["-n", "machdep.cpu.brand_string"]);

        #[cfg(target_os = "windows")]
        let model = command_stdout("wmic", &["cpu", "get", "name", "/value"]).and_then(|out| {
            out.lines()
                .find(|line| line.starts_with("Name="))
                .map(|line| line.trim_start_matches("Name=").trim().to_string())
        });

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        let model: Option<String> = None;

        model.unwrap_or_else(|| "Unknown CPU".to_string())
    }

    fn memory_gb() -> f64 {
        #[cfg(target_os = "linux")]
        let bytes = proc_field("/proc/meminfo", "MemTotal").and_then(|v| {
            v.split_whitespace()
                .next()
                .and_then(|kb| kb.parse::<u64>().ok())
                .map(|kb| kb * 1024)
        });

        #[cfg(target_os = "macos")]
        let bytes = command_stdout("sysctl", &["-n", "hw.memsize"])
            .and_then(|v| v.parse::<u64>().ok());

        #[cfg(target_os = "windows")]
        let bytes = command_stdout(
            "wmic",
            &["computersystem", "get", "TotalPhysicalMemory", "/value"],
        )
        .and_then(|out| {
            out.lines()
                .find(|line| line.starts_with("TotalPhysicalMemory="))
                .and_then(|line| {
                    line.trim_start_matches("TotalPhysicalMemory=")
                        .trim()
                        .parse::<u64>()
                        .ok()
                })
        });

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        let bytes: Option<u64> = None;

        bytes
            .map(|b| b as f64 / (1024.0 * 1024.0 * 1024.0))
            .unwrap_or(0.0)
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: f64,
    analytic_value: Option<f64>,
    relative_error: Option<f64>,
}

fn run_simulation_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    let base = PathConfig {
        s0: 100.0,
        sigma: 0.2,
        t: 1.0,
        dt: 1.0 / 252.0,
        seed: 42,
        demean: true,
    };
    let points = base.n_points();

    for &n_paths in &[1_000usize, 10_000] {
        println!(
            "Simulating {} paths of {} points each...",
            n_paths, points
        );

        let mut timer = Timer::new();
        timer.start();
        let paths = simulate_paths(&base, n_paths).expect("Valid configuration");
        let time_ms = timer.elapsed_ms();

        let mean_terminal = paths
            .iter()
            .map(|p| *p.last().expect("non-empty path"))
            .sum::<f64>()
            / n_paths as f64;

        // De-meaned paths are martingales, so the mean terminal price
        // should land on s0
        results.push(BenchmarkResult {
            name: format!("Path Simulation ({}k paths x {} pts)", n_paths / 1000, points),
            paths: n_paths,
            time_ms,
            throughput_paths_per_sec: n_paths as f64 / (time_ms / 1000.0),
            value: mean_terminal,
            analytic_value: Some(base.s0),
            relative_error: Some((mean_terminal - base.s0).abs() / base.s0),
        });
    }

    results
}

fn run_monte_carlo_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    let paths_configs = [10_000, 100_000, 1_000_000];

    for &paths in &paths_configs {
        println!("Running benchmarks with {} paths...", paths);

        // European Call Price
        let cfg = McConfig {
            paths,
            steps: 1,
            s0: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
            seed: 42,
            use_antithetic: true,
            use_control_variate: true,
            payoff: Payoff::EuropeanCall { k: 100.0 },
            greeks: GreeksConfig::NONE,
            epsilon: None,
        };

        let mut timer = Timer::new();
        timer.start();
        let (mc_price, _) = mc_price_european(&cfg).expect("Valid configuration");
        let time_ms = timer.elapsed_ms();
        let throughput = paths as f64 / (time_ms / 1000.0);
        let analytic_price = bs_analytic::bs_call_price(cfg.s0, 100.0, cfg.r, cfg.sigma, cfg.t);
        let rel_error = (mc_price - analytic_price).abs() / analytic_price;

        results.push(BenchmarkResult {
            name: format!("European Call Price ({}k paths)", paths / 1000),
            paths,
            time_ms,
            throughput_paths_per_sec: throughput,
            value: mc_price,
            analytic_value: Some(analytic_price),
            relative_error: Some(rel_error),
        });

        // Greeks (only for largest path count to save time)
        if paths == 1_000_000 {
            let cfg_greeks = McConfig {
                use_control_variate: false,
                epsilon: Some(0.001 * cfg.s0),
                ..cfg
            };

            // Delta
            timer.start();
            let mc_delta = mc_delta_european_call_pathwise(&cfg_greeks);
            let delta_time = timer.elapsed_ms();
            let delta_throughput = paths as f64 / (delta_time / 1000.0);
            let analytic_delta = bs_analytic::bs_call_delta(cfg.s0, 100.0, cfg.r, cfg.sigma, cfg.t);

            results.push(BenchmarkResult {
                name: "European Call Delta".to_string(),
                paths,
                time_ms: delta_time,
                throughput_paths_per_sec: delta_throughput,
                value: mc_delta,
                analytic_value: Some(analytic_delta),
                relative_error: Some((mc_delta - analytic_delta).abs() / analytic_delta),
            });

            // Gamma
            timer.start();
            let mc_gamma = mc_gamma_european_call_finite_diff(&cfg_greeks);
            let gamma_time = timer.elapsed_ms();
            let gamma_throughput = paths as f64 / (gamma_time / 1000.0);
            let analytic_gamma = bs_analytic::bs_call_gamma(cfg.s0, 100.0, cfg.r, cfg.sigma, cfg.t);

            results.push(BenchmarkResult {
                name: "European Call Gamma (FD)".to_string(),
                paths,
                time_ms: gamma_time,
                throughput_paths_per_sec: gamma_throughput,
                value: mc_gamma,
                analytic_value: Some(analytic_gamma),
                relative_error: Some((mc_gamma - analytic_gamma).abs() / analytic_gamma),
            });
        }
    }

    results
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) {
    let mut file = File::create(filename).expect("Could not create CSV file");

    // Write system information as comments
    writeln!(file, "# System Information").unwrap();
    writeln!(file, "# OS: {}", system_info.os).unwrap();
    writeln!(file, "# CPU: {}", system_info.cpu_model).unwrap();
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores).unwrap();
    writeln!(file, "# Memory: {:.1} GB", system_info.memory_gb).unwrap();
    writeln!(file, "# Rust Version: {}", system_info.rust_version).unwrap();
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags).unwrap();
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads).unwrap();
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .unwrap();
    writeln!(file, "#").unwrap();

    // Write CSV header
    writeln!(
        file,
        "Benchmark,Paths,Time_ms,Throughput_paths_per_sec,Value,Analytic_Value,Relative_Error"
    )
    .unwrap();

    // Write results
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{},{}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result
                .analytic_value
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.6}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )
        .unwrap();
    }

    println!("Results written to {}", filename);
}

fn main() {
    println!("fair-price Benchmark Suite");
    println!("==========================\n");

    println!("Gathering system information...");
    let system_info = SystemInfo::gather();

    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Memory: {:.1} GB", system_info.memory_gb);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running path simulation benchmarks...");
    let sim_results = run_simulation_benchmarks();

    println!("\nRunning Monte Carlo pricing benchmarks...");
    let mc_results = run_monte_carlo_benchmarks();

    let mut all_results = sim_results;
    all_results.extend(mc_results);

    // Display results
    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<35} {:>8} {:>12} {:>15} {:>10} {:>10} {:>12}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "Value", "Analytic", "Rel Error"
    );
    println!("{:-<80}", "");

    for result in &all_results {
        println!(
            "{:<35} {:>8} {:>12.2} {:>15.0} {:>10.4} {:>10} {:>12}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result
                .analytic_value
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.2}%", e * 100.0))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }

    println!("{:=<80}", "");

    // Write to CSV
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&all_results, &system_info, &filename);

    println!("\nBenchmark complete!");
    println!("Results saved to: {}", filename);
    println!("\nTo reproduce these results:");
    println!("1. Use Rust version: {}", system_info.rust_version);
    println!("2. Set RUSTFLAGS: {}", system_info.rustc_flags);
    println!("3. Run: cargo run --bin benchmark --release");
    println!(
        "4. Ensure {} CPU threads available",
        system_info.rayon_threads
    );
}
