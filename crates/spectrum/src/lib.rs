//! Module for discrete multigroup neutron spectra
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod reader;
mod spectrum;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use spectrum::Spectrum;

#[doc(inline)]
pub use reader::read_json;

#[doc(inline)]
pub use writer::{write_ascii, write_json};

#[doc(inline)]
pub use error::{Error, Result};
