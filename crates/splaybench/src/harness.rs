//! Timing harness for the range-sum and Fibonacci suites

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use splaycache::{
    fibonacci_iterative, FibonacciStrategy, LruFibonacci, Query, QueryResult, RangeArray,
    RangeStrategy, RangeSumCache, SplayFibonacci, StatsSnapshot, UncachedRangeStore,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::workload::Workload;

/// Result of replaying the range workload against one strategy
#[derive(Debug, Clone, Serialize)]
pub struct RangeTiming {
    pub strategy: String,
    pub elapsed_secs: f64,
    /// Wrapping sum of every range result
    pub checksum: u64,
    pub ranges: usize,
    pub updates: usize,
    /// `None` for strategies without a cache
    pub stats: Option<StatsSnapshot>,
}

/// Time for computing `F(n)` with each memo
#[derive(Debug, Clone, Serialize)]
pub struct FibTiming {
    pub n: u64,
    pub lru_secs: f64,
    pub splay_secs: f64,
    /// Decimal digits in `F(n)`
    pub digits: usize,
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: String,
    pub config: BenchConfig,
    pub range: Vec<RangeTiming>,
    pub fibonacci: Vec<FibTiming>,
}

/// Run the suites selected by `config`
pub fn run(config: &BenchConfig) -> Result<BenchReport> {
    let range = if config.runs_range() {
        let workload = Workload::generate(config);
        info!(
            "Generated workload: {} elements, {} ranges, {} updates",
            workload.initial.len(),
            workload.range_count(),
            workload.update_count()
        );
        run_range_benchmark(config, &workload)?
    } else {
        Vec::new()
    };

    let fibonacci = if config.runs_fibonacci() {
        run_fibonacci_benchmark(config)?
    } else {
        Vec::new()
    };

    Ok(BenchReport {
        generated_at: Utc::now().to_rfc3339(),
        config: config.clone(),
        range,
        fibonacci,
    })
}

/// Replay `queries` and return elapsed time plus result checksum
pub fn time_range_strategy(
    strategy: &mut dyn RangeStrategy,
    queries: &[Query],
) -> Result<(Duration, u64)> {
    let mut checksum = 0u64;
    let start = Instant::now();
    for query in queries {
        let result = strategy
            .query(query)
            .with_context(|| format!("{} failed on {:?}", strategy.name(), query))?;
        if let QueryResult::Sum(sum) = result {
            checksum = checksum.wrapping_add(sum);
        }
    }
    Ok((start.elapsed(), checksum))
}

/// Time the no-cache and LRU strategies over identical copies of the workload
pub fn run_range_benchmark(config: &BenchConfig, workload: &Workload) -> Result<Vec<RangeTiming>> {
    info!("Running range-sum suite ({} queries)", workload.queries.len());

    let ranges = workload.range_count();
    let updates = workload.update_count();

    let mut uncached = UncachedRangeStore::new(RangeArray::new(workload.initial.clone()));
    let (elapsed, uncached_checksum) = time_range_strategy(&mut uncached, &workload.queries)?;
    info!("{}: {:.2?}", uncached.name(), elapsed);
    let baseline = RangeTiming {
        strategy: uncached.name().to_string(),
        elapsed_secs: elapsed.as_secs_f64(),
        checksum: uncached_checksum,
        ranges,
        updates,
        stats: None,
    };

    let mut cached =
        RangeSumCache::with_capacity(RangeArray::new(workload.initial.clone()), config.capacity)?;
    let (elapsed, cached_checksum) = time_range_strategy(&mut cached, &workload.queries)?;
    info!("{}: {:.2?}", cached.name(), elapsed);
    let stats = cached.stats().snapshot();
    debug!(
        "{} stats: {} hits, {} misses, {} evictions, {} invalidations",
        cached.name(),
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.invalidations
    );

    if cached.array() != uncached.array() {
        bail!("range strategies left different arrays behind");
    }

    let timings = vec![
        baseline,
        RangeTiming {
            strategy: cached.name().to_string(),
            elapsed_secs: elapsed.as_secs_f64(),
            checksum: cached_checksum,
            ranges,
            updates,
            stats: Some(stats),
        },
    ];
    ensure_checksums_agree(&timings)?;
    Ok(timings)
}

/// Fail unless every timing reports the same checksum as the first
pub fn ensure_checksums_agree(timings: &[RangeTiming]) -> Result<()> {
    let Some((first, rest)) = timings.split_first() else {
        return Ok(());
    };
    for timing in rest {
        if timing.checksum != first.checksum {
            warn!(
                "Checksum mismatch: {} = {}, {} = {}",
                first.strategy, first.checksum, timing.strategy, timing.checksum
            );
            bail!("range strategies disagree on workload results");
        }
    }
    Ok(())
}

/// Time `F(n)` for each index in the sweep
///
/// The LRU memo is shared across the sweep. Each index gets a fresh splay tree.
pub fn run_fibonacci_benchmark(config: &BenchConfig) -> Result<Vec<FibTiming>> {
    let n_values = config.fib_values();
    info!("Running Fibonacci suite ({} indices)", n_values.len());

    let mut lru = LruFibonacci::with_capacity(config.fib_capacity)?;
    let timings = time_fibonacci_sweep(&n_values, &mut lru, SplayFibonacci::new)?;

    let stats = lru.stats().snapshot();
    debug!(
        "{} stats: {} hits, {} misses, {} evictions",
        lru.name(),
        stats.hits,
        stats.misses,
        stats.evictions
    );

    Ok(timings)
}

/// Time `shared` and a `fresh()` strategy at each index, checking both
/// against the iterative reference
pub fn time_fibonacci_sweep<S, F>(
    n_values: &[u64],
    shared: &mut dyn FibonacciStrategy,
    mut fresh: F,
) -> Result<Vec<FibTiming>>
where
    S: FibonacciStrategy,
    F: FnMut() -> S,
{
    let mut timings = Vec::with_capacity(n_values.len());

    for &n in n_values {
        let mut per_index = fresh();

        let (shared_value, shared_elapsed) = timed(|| shared.compute(n));
        let (fresh_value, fresh_elapsed) = timed(|| per_index.compute(n));

        let reference = fibonacci_iterative(n);
        if shared_value != reference || fresh_value != reference {
            warn!(
                "F({}) mismatch between {} and {}",
                n,
                shared.name(),
                per_index.name()
            );
            bail!("Fibonacci strategies disagree at n = {}", n);
        }

        debug!(
            "F({}): {} {:.8}s, {} {:.8}s",
            n,
            shared.name(),
            shared_elapsed.as_secs_f64(),
            per_index.name(),
            fresh_elapsed.as_secs_f64()
        );

        timings.push(FibTiming {
            n,
            lru_secs: shared_elapsed.as_secs_f64(),
            splay_secs: fresh_elapsed.as_secs_f64(),
            digits: reference.to_string().len(),
        });
    }

    Ok(timings)
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}
