//! Backing array for range-sum workloads

use crate::error::{Error, Result};

/// Fixed-length array of values supporting inclusive range sums and point updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeArray {
    values: Vec<u64>,
}

impl RangeArray {
    /// Wrap an existing vector of values
    pub fn new(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// Sum of elements in `[left, right]`, both ends inclusive
    ///
    /// # Arguments
    /// * `left` - First index in the range
    /// * `right` - Last index in the range
    ///
    /// # Returns
    /// * `Result<u64>` - Sum, or an error if the range is inverted, out of
    ///   bounds, or its sum overflows `u64`
    pub fn range_sum(&self, left: usize, right: usize) -> Result<u64> {
        self.check_range(left, right)?;
        self.values[left..=right]
            .iter()
            .try_fold(0u64, |acc, &value| acc.checked_add(value))
            .ok_or(Error::Overflow { left, right })
    }

    /// Overwrite the element at `index`
    pub fn update(&mut self, index: usize, value: u64) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Validate an inclusive range without summing it
    pub fn check_range(&self, left: usize, right: usize) -> Result<()> {
        if left > right {
            return Err(Error::InvalidRange { left, right });
        }
        if right >= self.values.len() {
            return Err(Error::OutOfBounds {
                index: right,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    /// Element at `index`, if in bounds
    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the array has no elements
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the underlying values
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }
}

impl From<Vec<u64>> for RangeArray {
    fn from(values: Vec<u64>) -> Self {
        Self::new(values)
    }
}
