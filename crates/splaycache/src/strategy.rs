//! Strategy traits driven by the benchmark harness

use num_bigint::BigUint;
use splaycore::Result;

/// One operation in a range-sum workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of `[left, right]`, both inclusive
    Range {
        /// First index
        left: usize,
        /// Last index
        right: usize,
    },
    /// Write `value` at `index`
    Update {
        /// Target index
        index: usize,
        /// New element value
        value: u64,
    },
}

/// Outcome of a [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResult {
    /// Range sum
    Sum(u64),
    /// Update applied
    Updated,
}

/// A way of answering range-sum workloads
pub trait RangeStrategy {
    /// Short label used in reports
    fn name(&self) -> &'static str;

    /// Sum of `[left, right]`, both inclusive
    fn range_sum(&mut self, left: usize, right: usize) -> Result<u64>;

    /// Write `value` at `index`
    fn update(&mut self, index: usize, value: u64) -> Result<()>;

    /// Apply one query
    fn query(&mut self, op: &Query) -> Result<QueryResult> {
        match *op {
            Query::Range { left, right } => self.range_sum(left, right).map(QueryResult::Sum),
            Query::Update { index, value } => {
                self.update(index, value)?;
                Ok(QueryResult::Updated)
            }
        }
    }
}

/// A way of computing Fibonacci numbers
pub trait FibonacciStrategy {
    /// Short label used in reports
    fn name(&self) -> &'static str;

    /// Compute `F(n)` with `F(0) = 0`, `F(1) = 1`
    fn compute(&mut self, n: u64) -> BigUint;
}
