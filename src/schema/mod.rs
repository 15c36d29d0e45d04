//! Table schema and partition-key declarations.
//!
//! Pure construction only: nothing here talks to a storage engine, so every
//! declaration error surfaces before the first remote call.
mod builder;
mod field;
mod key;
mod kind;
mod options;
mod table;
mod value;

pub use builder::*;
pub use field::*;
pub use key::*;
pub use kind::*;
pub use options::*;
pub use table::*;
pub use value::*;
