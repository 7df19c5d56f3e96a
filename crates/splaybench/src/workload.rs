//! Seeded random workload generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splaycache::Query;

use crate::config::BenchConfig;

/// Starting array plus the query stream replayed against every strategy
#[derive(Debug, Clone)]
pub struct Workload {
    pub initial: Vec<u64>,
    pub queries: Vec<Query>,
}

impl Workload {
    /// Generate a workload; the same config and seed always yield the same workload
    pub fn generate(config: &BenchConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let len = config.array_size;

        let initial = (0..len)
            .map(|_| rng.gen_range(1..=config.max_value))
            .collect();

        let queries = (0..config.queries)
            .map(|_| {
                if rng.gen_bool(config.range_ratio) {
                    let left = rng.gen_range(0..len);
                    let right = rng.gen_range(left..len);
                    Query::Range { left, right }
                } else {
                    Query::Update {
                        index: rng.gen_range(0..len),
                        value: rng.gen_range(1..=config.max_value),
                    }
                }
            })
            .collect();

        Self { initial, queries }
    }

    /// Number of range queries
    pub fn range_count(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| matches!(q, Query::Range { .. }))
            .count()
    }

    /// Number of update queries
    pub fn update_count(&self) -> usize {
        self.queries.len() - self.range_count()
    }
}
