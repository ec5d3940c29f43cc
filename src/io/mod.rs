//! Input/output helpers.
//!
//! - rental batch JSON read/write (`rentals`)
//! - charge summary export to CSV (`export`)

pub mod export;
pub mod rentals;

pub use export::*;
pub use rentals::*;
