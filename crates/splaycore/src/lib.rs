//! # splaycore
//!
//! Core data structures for the splaycache benchmarks.
//!
//! ## Contents
//! - **SplayTree**: self-adjusting BST, every access splays the requested key to the root
//! - **RangeArray**: backing array for inclusive range-sum queries with point updates
//! - **Error**: bounds and range violations shared by the cache layer

#![warn(missing_docs)]

mod array;
mod error;
mod splay;

pub use array::RangeArray;
pub use error::{Error, Result};
pub use splay::{Iter, SplayTree};
