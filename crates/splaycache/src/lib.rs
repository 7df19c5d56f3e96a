//! # splaycache
//!
//! Caching strategies layered over the splaycore data structures.
//!
//! ## Architecture
//! - **LruCache**: AHash map plus an index-linked recency list, O(1) get/put/evict
//! - **RangeSumCache**: LRU over `(left, right)` range sums, cleared on every array write
//! - **UncachedRangeStore**: baseline that sums the slice on every query
//! - **Fibonacci**: memoization backed by either an `LruCache` or a `SplayTree`
//!
//! Every strategy implements [`RangeStrategy`] or [`FibonacciStrategy`] so a
//! harness can drive them interchangeably.
//!
//! ## Features
//! - `serde`: derive `Serialize` for [`StatsSnapshot`]

#![warn(missing_docs)]

pub mod fib;
mod lru;
mod range;
mod stats;
mod strategy;

pub use fib::{
    fibonacci_iterative, fibonacci_lru, fibonacci_splay, IterativeFibonacci, LruFibonacci,
    SplayFibonacci,
};
pub use lru::LruCache;
pub use range::{RangeSumCache, UncachedRangeStore};
pub use stats::{CacheStats, StatsSnapshot};
pub use strategy::{FibonacciStrategy, Query, QueryResult, RangeStrategy};

pub use splaycore::{Error, RangeArray, Result, SplayTree};
