//! Bulk write and full-table read.
//!
//! - [`Pool`] — Concurrent insert workers over a shared engine handle
//! - [`insert_all`] — Bulk insert with an explicit [`OnRecordError`] policy
//! - [`Reader`] / [`scan_all`] — Descriptor-driven full scans
mod pool;
mod read;
mod worker;
mod write;

pub use pool::*;
pub use read::*;
pub use worker::*;
pub use write::*;
