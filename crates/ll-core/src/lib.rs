//! ll-core: stable foundation for looplab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - bounds (validated clamp intervals)
//! - error (shared error types)

pub mod bounds;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use bounds::Bounds;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
