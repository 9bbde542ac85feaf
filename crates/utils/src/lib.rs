//! Common utility for extended `std` types and numeric grids
//!
//! These are left public for convenience.
//!
//! For example, checking that a set of group boundaries is strictly
//! increasing, building log-spaced energy grids, or using prettier formatting
//! for scientific numbers are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod grid;
mod slice_ext;
mod value_ext;

// Flatten
pub use error::{Error, Result};
pub use grid::{interpolate, logspace};
pub use slice_ext::SliceExt;
pub use value_ext::ValueExt;
