// src/output.rs
use std::fs::File;
use std::io::{self, Write};

/// Long-format dump of a path ensemble: one row per sample, so the file
/// loads straight into a dataframe or pivot table
pub fn write_paths_to_csv(filename: &str, paths: &[Vec<f64>], dt: f64) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "path,step,time,price")?;
    for (path_id, path) in paths.iter().enumerate() {
        for (step, price) in path.iter().enumerate() {
            writeln!(file, "{},{},{},{}", path_id, step, step as f64 * dt, price)?;
        }
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "metric,value")?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
