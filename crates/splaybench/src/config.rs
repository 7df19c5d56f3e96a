//! Command-line arguments and validated run configuration

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Which benchmark suites to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    /// Range-sum queries: no cache vs. LRU cache
    Range,
    /// Fibonacci: LRU memo vs. splay tree
    Fibonacci,
    /// Both suites
    All,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of elements in the range-sum array
    #[arg(long, default_value_t = 100_000)]
    pub array_size: usize,

    /// Number of generated range/update queries
    #[arg(short, long, default_value_t = 50_000)]
    pub queries: usize,

    /// Fraction of queries that are range sums (the rest are updates)
    #[arg(long, default_value_t = 0.7)]
    pub range_ratio: f64,

    /// Largest element / update value (values are drawn from 1..=max)
    #[arg(long, default_value_t = 1000)]
    pub max_value: u64,

    /// Range-sum LRU cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1000)]
    pub capacity: usize,

    /// Largest Fibonacci index in the sweep
    #[arg(long, default_value_t = 950)]
    pub fib_max: u64,

    /// Step between Fibonacci indices in the sweep
    #[arg(long, default_value_t = 50)]
    pub fib_step: u64,

    /// Fibonacci LRU memo capacity
    #[arg(long, default_value_t = 1024)]
    pub fib_capacity: usize,

    /// RNG seed for the workload (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suites to run
    #[arg(long, value_enum, default_value_t = Suite::All)]
    pub suite: Suite,

    /// Write the full report as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Validated settings for one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchConfig {
    pub array_size: usize,
    pub queries: usize,
    pub range_ratio: f64,
    pub max_value: u64,
    pub capacity: usize,
    pub fib_max: u64,
    pub fib_step: u64,
    pub fib_capacity: usize,
    pub seed: u64,
    pub suite: Suite,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            array_size: 100_000,
            queries: 50_000,
            range_ratio: 0.7,
            max_value: 1000,
            capacity: 1000,
            fib_max: 950,
            fib_step: 50,
            fib_capacity: 1024,
            seed: 0,
            suite: Suite::All,
        }
    }
}

impl BenchConfig {
    /// Build a config from parsed arguments, drawing a seed if none was given
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Self {
            array_size: args.array_size,
            queries: args.queries,
            range_ratio: args.range_ratio,
            max_value: args.max_value,
            capacity: args.capacity,
            fib_max: args.fib_max,
            fib_step: args.fib_step,
            fib_capacity: args.fib_capacity,
            seed: args.seed.unwrap_or_else(rand::random),
            suite: args.suite,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the workload generator or caches cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.array_size == 0 {
            bail!("array size must be greater than 0");
        }
        if self.capacity == 0 {
            bail!("range cache capacity must be greater than 0");
        }
        if self.fib_capacity == 0 {
            bail!("Fibonacci cache capacity must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.range_ratio) {
            bail!("range ratio must be within [0, 1], got {}", self.range_ratio);
        }
        if self.max_value == 0 {
            bail!("max value must be at least 1");
        }
        if self.fib_step == 0 {
            bail!("Fibonacci step must be greater than 0");
        }
        if (self.array_size as u64).checked_mul(self.max_value).is_none() {
            bail!(
                "array size {} with max value {} can overflow a u64 range sum",
                self.array_size,
                self.max_value
            );
        }
        Ok(())
    }

    /// Fibonacci indices to time: `0, step, 2*step, ..` up to `fib_max`
    pub fn fib_values(&self) -> Vec<u64> {
        (0..=self.fib_max).step_by(self.fib_step as usize).collect()
    }

    /// True if the range-sum suite is selected
    pub fn runs_range(&self) -> bool {
        matches!(self.suite, Suite::Range | Suite::All)
    }

    /// True if the Fibonacci suite is selected
    pub fn runs_fibonacci(&self) -> bool {
        matches!(self.suite, Suite::Fibonacci | Suite::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["splaybench", "--seed", "7"]);
        let config = BenchConfig::from_args(&args).unwrap();

        assert_eq!(config, BenchConfig { seed: 7, ..BenchConfig::default() });
    }

    #[test]
    fn test_fib_values() {
        let config = BenchConfig::default();
        let values = config.fib_values();

        assert_eq!(values.len(), 20);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values[1], 50);
        assert_eq!(values.last(), Some(&950));
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let bad = [
            BenchConfig { array_size: 0, ..BenchConfig::default() },
            BenchConfig { capacity: 0, ..BenchConfig::default() },
            BenchConfig { fib_capacity: 0, ..BenchConfig::default() },
            BenchConfig { range_ratio: 1.5, ..BenchConfig::default() },
            BenchConfig { max_value: 0, ..BenchConfig::default() },
            BenchConfig { fib_step: 0, ..BenchConfig::default() },
        ];

        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_validation_rejects_overflowing_sums() {
        let config = BenchConfig {
            array_size: 2,
            max_value: u64::MAX,
            ..BenchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overflow"));

        let config = BenchConfig {
            array_size: 1,
            max_value: u64::MAX,
            ..BenchConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_suite_selection() {
        let args = Args::parse_from(["splaybench", "--suite", "fibonacci", "--seed", "1"]);
        let config = BenchConfig::from_args(&args).unwrap();

        assert!(config.runs_fibonacci());
        assert!(!config.runs_range());
    }
}
