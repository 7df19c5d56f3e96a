//! Error types for splaycore

use std::fmt;

/// Result type alias for splaycore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations on array and cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index past the end of the array
    OutOfBounds {
        /// Offending index
        index: usize,
        /// Array length at the time of the call
        len: usize,
    },

    /// Range whose left bound exceeds its right bound
    InvalidRange {
        /// Left (inclusive) bound
        left: usize,
        /// Right (inclusive) bound
        right: usize,
    },

    /// Range whose sum does not fit in a `u64`
    Overflow {
        /// Left (inclusive) bound
        left: usize,
        /// Right (inclusive) bound
        right: usize,
    },

    /// Cache constructed with a capacity of zero
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} (len {})", index, len)
            }
            Error::InvalidRange { left, right } => {
                write!(f, "Invalid range: [{}, {}] (left > right)", left, right)
            }
            Error::Overflow { left, right } => {
                write!(f, "Range sum overflows u64: [{}, {}]", left, right)
            }
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
        }
    }
}

impl std::error::Error for Error {}
