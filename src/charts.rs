// src/charts.rs
//! Chart rendering for simulations and pricing
//!
//! Bitmap output via plotters. Each function writes a PNG to the path it
//! is given and prints where the file landed.

use crate::analytics::bs_analytic;
use crate::analytics::lognormal::TerminalDistribution;
use crate::mc::mc_engine::{mc_price_european, McConfig};
use crate::mc::payoffs::Payoff;
use crate::models::gbm::{simulate_paths, PathConfig};
use plotters::prelude::*;

/// Overlay an ensemble of simulated price paths, with an optional
/// horizontal strike line
pub fn plot_price_paths(
    paths: &[Vec<f64>],
    t: f64,
    strike: Option<f64>,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if paths.is_empty() || paths[0].len() < 2 {
        return Err("need at least one path with two samples".into());
    }

    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let num_steps = paths[0].len() - 1;

    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    for path in paths {
        for &price in path {
            min_price = min_price.min(price);
            max_price = max_price.max(price);
        }
    }
    if let Some(k) = strike {
        min_price = min_price.min(k);
        max_price = max_price.max(k);
    }

    let mut pad = (max_price - min_price) * 0.1;
    if pad == 0.0 {
        // Flat ensemble (zero volatility); give the axis some room
        pad = max_price.abs().max(1.0) * 0.05;
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Simulated Price Paths ({} paths)", paths.len()),
            ("sans-serif", 30),
        )
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..t, (min_price - pad)..(max_price + pad))?;

    chart
        .configure_mesh()
        .x_desc("Time (years)")
        .y_desc("Price")
        .draw()?;

    if let Some(k) = strike {
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, k), (t, k)],
                RED.mix(0.5).stroke_width(2),
            ))?
            .label("Strike")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5).stroke_width(2))
            });
    }

    for (i, path) in paths.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.5);
        let points: Vec<(f64, f64)> = path
            .iter()
            .enumerate()
            .map(|(step, &price)| (step as f64 * t / num_steps as f64, price))
            .collect();

        chart.draw_series(LineSeries::new(points, color.stroke_width(1)))?;
    }

    if strike.is_some() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    println!("Price paths chart saved as {}", filename);
    Ok(())
}

/// Histogram of simulated terminal prices with the analytic lognormal
/// density overlaid and the exercise probability annotated
pub fn plot_terminal_distribution(
    cfg: &PathConfig,
    n_paths: usize,
    strike: f64,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.n_points() < 2 {
        return Err("terminal distribution needs at least two samples per path".into());
    }

    let paths = simulate_paths(cfg, n_paths)?;
    let terminals: Vec<f64> = paths.iter().map(|p| *p.last().unwrap()).collect();

    // The final sample sits at (n - 1)·dt, not exactly at cfg.t
    let t_last = (cfg.n_points() - 1) as f64 * cfg.dt;
    let mu = if cfg.demean {
        0.0
    } else {
        0.5 * cfg.sigma * cfg.sigma
    };
    let law = TerminalDistribution::new(cfg.s0, mu, cfg.sigma, t_last)?;

    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let min_s = terminals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_s = terminals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let num_bins = 50;
    let bin_width = (max_s - min_s) / num_bins as f64;
    let mut histogram = vec![0u32; num_bins];
    for s in &terminals {
        let bin = ((s - min_s) / bin_width).floor() as usize;
        histogram[bin.min(num_bins - 1)] += 1;
    }

    let max_count = *histogram.iter().max().unwrap();
    let y_max = max_count as f64 * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Terminal Price Distribution ({} paths)", n_paths),
            ("sans-serif", 30),
        )
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_s..max_s, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Terminal price")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(histogram.iter().enumerate().map(|(i, &count)| {
        let left = min_s + i as f64 * bin_width;
        let right = left + bin_width;
        Rectangle::new([(left, 0.0), (right, count as f64)], BLUE.mix(0.4).filled())
    }))?;

    let pdf_points: Vec<(f64, f64)> = (0..=200)
        .map(|i| {
            let s = min_s + (max_s - min_s) * i as f64 / 200.0;
            (s, law.pdf(s) * n_paths as f64 * bin_width)
        })
        .collect();

    chart
        .draw_series(LineSeries::new(pdf_points, RED.stroke_width(2)))?
        .label("Lognormal density")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            vec![(strike, 0.0), (strike, y_max)],
            BLACK.stroke_width(2),
        ))?
        .label("Strike")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart.draw_series(std::iter::once(Text::new(
        format!("P(S_T > K) = {:.1}%", law.prob_above(strike) * 100.0),
        (min_s + (max_s - min_s) * 0.05, y_max * 0.9),
        ("sans-serif", 20).into_font().color(&BLACK),
    )))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    println!("Terminal distribution chart saved as {}", filename);
    Ok(())
}

/// Black-Scholes call value against spot next to the intrinsic hockey
/// stick; the gap between the two curves is the time value
pub fn plot_call_value_vs_spot(
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let spot_min = k * 0.5;
    let spot_max = k * 1.5;
    let samples = 200;

    let mut price_points = Vec::with_capacity(samples + 1);
    let mut intrinsic_points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let s = spot_min + (spot_max - spot_min) * i as f64 / samples as f64;
        price_points.push((s, bs_analytic::bs_call_price(s, k, r, sigma, t)));
        intrinsic_points.push((s, (s - k).max(0.0)));
    }

    let y_max = price_points.iter().map(|(_, v)| *v).fold(0.0, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Call Value vs Spot (K={}, sigma={}, T={})", k, sigma, t),
            ("sans-serif", 30),
        )
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(spot_min..spot_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Spot price")
        .y_desc("Option value")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            intrinsic_points,
            BLUE.mix(0.6).stroke_width(1),
        ))?
        .label("Intrinsic value")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], BLUE.mix(0.6).stroke_width(1))
        });

    chart
        .draw_series(LineSeries::new(price_points, RED.stroke_width(2)))?
        .label("Black-Scholes value")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    println!("Call value chart saved as {}", filename);
    Ok(())
}

/// Monte Carlo price estimates against path count, with the analytic
/// price as a reference line
pub fn plot_mc_convergence(
    cfg: &McConfig,
    path_counts: &[usize],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if path_counts.is_empty() {
        return Err("path_counts must not be empty".into());
    }

    let analytic = match cfg.payoff {
        Payoff::EuropeanCall { k } => {
            bs_analytic::bs_call_price(cfg.s0, k, cfg.r, cfg.sigma, cfg.t)
        }
        Payoff::EuropeanPut { k } => {
            bs_analytic::bs_put_price(cfg.s0, k, cfg.r, cfg.sigma, cfg.t)
        }
    };

    let mut estimates = Vec::with_capacity(path_counts.len());
    for &paths in path_counts {
        let mut run_cfg = cfg.clone();
        run_cfg.paths = paths;
        let (price, _) = mc_price_european(&run_cfg)?;
        estimates.push((paths as f64, price));
    }

    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = estimates.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = estimates
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = estimates.iter().map(|(_, p)| *p).fold(analytic, f64::min);
    let y_max = estimates.iter().map(|(_, p)| *p).fold(analytic, f64::max);

    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.2).max(analytic.abs() * 0.001);

    let mut chart = ChartBuilder::on(&root)
        .caption("Monte Carlo Convergence", ("sans-serif", 30))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )?;

    chart
        .configure_mesh()
        .x_desc("Paths")
        .y_desc("Price estimate")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            vec![(x_min - x_pad, analytic), (x_max + x_pad, analytic)],
            GREEN.stroke_width(2),
        ))?
        .label("Analytic price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(estimates.clone(), &BLUE))?
        .label("Monte Carlo estimate")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart.draw_series(
        estimates
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    println!("Convergence chart saved as {}", filename);
    Ok(())
}
