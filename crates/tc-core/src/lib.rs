//! tc-core: stable foundation for the two-channel thermal solver.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + profile helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TcError, TcResult};
pub use numeric::*;
pub use units::*;
