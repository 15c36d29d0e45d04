//! Persisting scanned record sets.
//!
//! A sink is a directory holding one binary COPY file per partition, the
//! table schema as JSON and a `_SUCCESS` marker written last.
mod disk;
pub mod pgcopy;

pub use disk::*;
