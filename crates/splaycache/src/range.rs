//! Range-sum stores: uncached baseline and LRU-cached variant

use splaycore::{Error, RangeArray, Result};

use crate::lru::LruCache;
use crate::stats::CacheStats;
use crate::strategy::RangeStrategy;

/// Baseline store that sums the slice on every query
#[derive(Debug, Clone)]
pub struct UncachedRangeStore {
    array: RangeArray,
}

impl UncachedRangeStore {
    /// Create a store over `array`
    pub fn new(array: RangeArray) -> Self {
        Self { array }
    }

    /// Borrow the backing array
    pub fn array(&self) -> &RangeArray {
        &self.array
    }
}

impl RangeStrategy for UncachedRangeStore {
    fn name(&self) -> &'static str {
        "no-cache"
    }

    fn range_sum(&mut self, left: usize, right: usize) -> Result<u64> {
        self.array.range_sum(left, right)
    }

    fn update(&mut self, index: usize, value: u64) -> Result<()> {
        self.array.update(index, value)
    }
}

/// Range-sum store with an LRU cache keyed by `(left, right)`
///
/// A single write can change any number of cached sums, so every successful
/// `update` clears the whole cache.
pub struct RangeSumCache {
    /// Underlying values
    array: RangeArray,

    /// Cached sums for recently queried ranges
    cache: LruCache<(usize, usize), u64>,

    /// Cache statistics
    stats: CacheStats,
}

impl RangeSumCache {
    /// Capacity used by [`RangeSumCache::new`]
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache over `array` with [`Self::DEFAULT_CAPACITY`] entries
    pub fn new(array: RangeArray) -> Self {
        Self {
            array,
            cache: LruCache::new(Self::DEFAULT_CAPACITY),
            stats: CacheStats::new(),
        }
    }

    /// Create a cache over `array` holding at most `capacity` sums
    ///
    /// # Returns
    /// * `Result<RangeSumCache>` - `Error::ZeroCapacity` if `capacity` is 0
    pub fn with_capacity(array: RangeArray, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            array,
            cache: LruCache::new(capacity),
            stats: CacheStats::new(),
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Check if `[left, right]` is currently cached
    pub fn is_cached(&self, left: usize, right: usize) -> bool {
        self.cache.contains(&(left, right))
    }

    /// Borrow the backing array
    pub fn array(&self) -> &RangeArray {
        &self.array
    }
}

impl RangeStrategy for RangeSumCache {
    fn name(&self) -> &'static str {
        "lru-cache"
    }

    /// Sum of `[left, right]`, from cache when possible
    ///
    /// # Arguments
    /// * `left` - First index in the range
    /// * `right` - Last index in the range
    ///
    /// # Returns
    /// * `Result<u64>` - Sum, or a bounds or overflow error. Failed ranges are
    ///   never cached.
    fn range_sum(&mut self, left: usize, right: usize) -> Result<u64> {
        let key = (left, right);
        if let Some(&sum) = self.cache.get(&key) {
            self.stats.record_hit();
            return Ok(sum);
        }

        let sum = self.array.range_sum(left, right)?;
        self.stats.record_miss();

        if self.cache.put(key, sum).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        Ok(sum)
    }

    /// Write `value` at `index` and drop every cached sum
    ///
    /// A rejected write leaves both the array and the cache untouched.
    fn update(&mut self, index: usize, value: u64) -> Result<()> {
        self.array.update(index, value)?;
        self.cache.clear();
        self.stats.record_invalidation();
        Ok(())
    }
}
