//! Core definitions shared by all poolsort-* crates: the error type, the result alias
//! and argument verification helpers.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
