//! `nflux` is a small toolkit for synthesising typical reactor neutron flux
//! spectra
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use nflux_utils as utils;

#[doc(inline)]
pub use nflux_quadrature as quadrature;

#[cfg(feature = "spectrum")]
#[cfg_attr(docsrs, doc(cfg(feature = "spectrum")))]
#[doc(inline)]
pub use nflux_spectrum as spectrum;

#[cfg(feature = "typical")]
#[cfg_attr(docsrs, doc(cfg(feature = "typical")))]
#[doc(inline)]
pub use nflux_typical as typical;
