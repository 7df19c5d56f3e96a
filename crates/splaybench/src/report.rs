//! Plain-text tables and JSON output for benchmark results

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::harness::{BenchReport, FibTiming, RangeTiming};

/// Render the range-sum results, one strategy per line
pub fn render_range_table(timings: &[RangeTiming]) -> String {
    let mut out = format!(
        "{:<12}{:<15}{:<12}{}\n",
        "Strategy", "Time (s)", "Hit ratio", "Checksum"
    );
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for timing in timings {
        let hit_ratio = timing
            .stats
            .map(|s| format!("{:.3}", s.hit_ratio))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<12}{:<15.4}{:<12}{}\n",
            timing.strategy, timing.elapsed_secs, hit_ratio, timing.checksum
        ));
    }
    out
}

/// Render the Fibonacci sweep as `n | LRU | splay` columns
pub fn render_fibonacci_table(timings: &[FibTiming]) -> String {
    let mut out = format!(
        "{:<10}{:<25}{}\n",
        "n", "LRU Cache Time (s)", "Splay Tree Time (s)"
    );
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for timing in timings {
        out.push_str(&format!(
            "{:<10}{:<25.8}{:.8}\n",
            timing.n, timing.lru_secs, timing.splay_secs
        ));
    }
    out
}

/// Print every non-empty section of the report to stdout
pub fn print_report(report: &BenchReport) {
    if !report.range.is_empty() {
        println!("\nRange-sum queries (seed {}):", report.config.seed);
        print!("{}", render_range_table(&report.range));
    }
    if !report.fibonacci.is_empty() {
        println!("\nFibonacci:");
        print!("{}", render_fibonacci_table(&report.fibonacci));
    }
}

/// Write the report as pretty-printed JSON
pub fn write_json(report: &BenchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).context(format!("Failed to write report: {:?}", path))?;
    Ok(())
}
