//! SplayCache benchmark runner

mod config;
mod harness;
mod report;
mod workload;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::{Args, BenchConfig};

fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG=debug adds per-index timings and cache stats
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = BenchConfig::from_args(&args)?;

    info!("Starting splaybench v{}", env!("CARGO_PKG_VERSION"));
    info!("Suite: {:?}", config.suite);
    info!("Seed: {}", config.seed);
    info!(
        "Array size: {}, queries: {}, range ratio: {}",
        config.array_size, config.queries, config.range_ratio
    );
    info!(
        "Range cache capacity: {}, Fibonacci memo capacity: {}",
        config.capacity, config.fib_capacity
    );

    let report = harness::run(&config)?;
    report::print_report(&report);

    if let Some(path) = &args.json {
        report::write_json(&report, path)?;
        info!("Report written to {:?}", path);
    }

    info!("Benchmark finished");
    Ok(())
}
