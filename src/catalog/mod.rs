//! Storage engine interfaces and table lifecycle.
//!
//! - [`Catalog`] — Existence, description, drop and create of tables
//! - [`Writer`] — Row inserts
//! - [`Scanner`] — Full-table reads into a [`RecordSet`]
//! - [`Lifecycle`] — Drop-and-recreate and declarative table setup
//! - [`Master`] — Cluster endpoint shared by administration and reads
mod admin;
mod handle;
mod io;
mod lifecycle;
mod master;
mod set;

pub use admin::*;
pub use handle::*;
pub use io::*;
pub use lifecycle::*;
pub use master::*;
pub use set::*;
