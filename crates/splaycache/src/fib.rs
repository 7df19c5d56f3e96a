//! Memoized Fibonacci over LRU and splay-tree caches
//!
//! Both strategies share one recursion: `F(n) = F(n-1) + F(n-2)` with
//! `F(0) = 0`, `F(1) = 1`. Base cases are never cached. Values are
//! arbitrary precision since `F(94)` already overflows `u64`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use splaycore::{Error, Result, SplayTree};

use crate::lru::LruCache;
use crate::stats::CacheStats;
use crate::strategy::FibonacciStrategy;

/// Default capacity of [`LruFibonacci`], above the largest index the
/// benchmark sweeps
pub const DEFAULT_FIB_CAPACITY: usize = 1024;

/// Storage the shared recursion memoizes into
trait Memo {
    fn lookup(&mut self, n: u64) -> Option<BigUint>;

    /// Returns true if an older entry was evicted to make room
    fn store(&mut self, n: u64, value: BigUint) -> bool;
}

impl Memo for LruCache<u64, BigUint> {
    fn lookup(&mut self, n: u64) -> Option<BigUint> {
        self.get(&n).cloned()
    }

    fn store(&mut self, n: u64, value: BigUint) -> bool {
        self.put(n, value).is_some()
    }
}

impl Memo for SplayTree<u64, BigUint> {
    fn lookup(&mut self, n: u64) -> Option<BigUint> {
        self.search(&n).cloned()
    }

    fn store(&mut self, n: u64, value: BigUint) -> bool {
        self.insert(n, value);
        false
    }
}

/// Wraps a memo and counts hits, misses, inserts and evictions
struct Tracked<'a, M> {
    memo: &'a mut M,
    stats: &'a CacheStats,
}

impl<M: Memo> Memo for Tracked<'_, M> {
    fn lookup(&mut self, n: u64) -> Option<BigUint> {
        let found = self.memo.lookup(n);
        if found.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    fn store(&mut self, n: u64, value: BigUint) -> bool {
        let evicted = self.memo.store(n, value);
        self.stats.record_insert();
        if evicted {
            self.stats.record_eviction();
        }
        evicted
    }
}

/// `F(n)` with every intermediate index looked up in, or stored to, `memo`
///
/// Evaluates `F(k - 1)` before `F(k - 2)` like the plain recursion would, but
/// keeps pending indices on a heap stack so large `n` cannot overflow the
/// thread stack.
fn memoized<M: Memo>(n: u64, memo: &mut M) -> BigUint {
    // Index still waiting on F(k - 1), or holding F(k - 1) while F(k - 2) runs
    let mut pending: Vec<(u64, Option<BigUint>)> = Vec::new();
    let mut next = n;

    loop {
        let mut value = if next <= 1 {
            BigUint::from(next)
        } else if let Some(value) = memo.lookup(next) {
            value
        } else {
            pending.push((next, None));
            next -= 1;
            continue;
        };

        loop {
            match pending.pop() {
                None => return value,
                Some((k, None)) => {
                    pending.push((k, Some(value)));
                    next = k - 2;
                    break;
                }
                Some((k, Some(first))) => {
                    value += first;
                    memo.store(k, value.clone());
                }
            }
        }
    }
}

/// `F(n)` memoized in an LRU table
pub fn fibonacci_lru(n: u64, memo: &mut LruCache<u64, BigUint>) -> BigUint {
    memoized(n, memo)
}

/// `F(n)` memoized in a splay tree
///
/// A cached `n` is answered by the search alone. Freshly computed values are
/// inserted and end up at the root.
pub fn fibonacci_splay(n: u64, tree: &mut SplayTree<u64, BigUint>) -> BigUint {
    memoized(n, tree)
}

/// `F(n)` by iteration, the reference both caches are checked against
pub fn fibonacci_iterative(n: u64) -> BigUint {
    let mut a = BigUint::zero();
    let mut b = BigUint::one();
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

/// LRU-memoized Fibonacci strategy
pub struct LruFibonacci {
    memo: LruCache<u64, BigUint>,
    stats: CacheStats,
}

impl LruFibonacci {
    /// Create with [`DEFAULT_FIB_CAPACITY`]
    pub fn new() -> Self {
        Self {
            memo: LruCache::new(DEFAULT_FIB_CAPACITY),
            stats: CacheStats::new(),
        }
    }

    /// Create with an explicit capacity
    ///
    /// Three entries are enough to keep the recursion linear. Smaller
    /// capacities still give correct results but evict values the recursion
    /// is about to need, and the call count grows exponentially.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            memo: LruCache::new(capacity),
            stats: CacheStats::new(),
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of memoized indices
    pub fn cache_len(&self) -> usize {
        self.memo.len()
    }
}

impl Default for LruFibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl FibonacciStrategy for LruFibonacci {
    fn name(&self) -> &'static str {
        "lru-cache"
    }

    fn compute(&mut self, n: u64) -> BigUint {
        let mut tracked = Tracked {
            memo: &mut self.memo,
            stats: &self.stats,
        };
        memoized(n, &mut tracked)
    }
}

/// Splay-tree-memoized Fibonacci strategy
pub struct SplayFibonacci {
    tree: SplayTree<u64, BigUint>,
    stats: CacheStats,
}

impl SplayFibonacci {
    /// Create with an empty tree
    pub fn new() -> Self {
        Self {
            tree: SplayTree::new(),
            stats: CacheStats::new(),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Borrow the backing tree
    pub fn tree(&self) -> &SplayTree<u64, BigUint> {
        &self.tree
    }
}

impl Default for SplayFibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl FibonacciStrategy for SplayFibonacci {
    fn name(&self) -> &'static str {
        "splay-tree"
    }

    fn compute(&mut self, n: u64) -> BigUint {
        let mut tracked = Tracked {
            memo: &mut self.tree,
            stats: &self.stats,
        };
        memoized(n, &mut tracked)
    }
}

/// Uncached iterative reference strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct IterativeFibonacci;

impl FibonacciStrategy for IterativeFibonacci {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn compute(&mut self, n: u64) -> BigUint {
        fibonacci_iterative(n)
    }
}
