//! Storage engine backends.
//!
//! - [`Memory`] — Embedded range-partitioned engine, always available
//! - [`postgres`] — PostgreSQL server over `tokio-postgres` (feature `database`)
mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::*;
