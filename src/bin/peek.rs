//! Quick head/tail preview of any CSV file.

use anyhow::{anyhow, Context, Result};
use carstats::read_csv;
use std::env;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("usage: peek <file.csv> [rows]"))?;
    let n: usize = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("rows must be a number")?
        .unwrap_or(5);

    let frame = read_csv(&path).with_context(|| format!("loading {}", path))?;
    let (rows, cols) = frame.shape();

    println!("{}: {} rows x {} cols", path, rows, cols);
    println!("\n--- head({}) ---", n);
    println!("{}", frame.head(n));
    println!("--- tail({}) ---", n);
    println!("{}", frame.tail(n));

    Ok(())
}
