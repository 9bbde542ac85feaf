//! Typical reactor neutron flux spectra
//!
//! Builds a continuous neutron flux spectrum from a handful of physical
//! parameters and discretises it into group-averaged values, for use as a
//! default or reference spectrum when unfolding.
//!
//! ## Quickstart example
//!
//! ```rust
//! # use nflux_typical::FluxTypical;
//! # use nflux_utils::logspace;
//! // 100 group edges from 3.16 meV to 12.6 MeV
//! let bins = logspace(-2.5, 7.1, 100);
//!
//! // one part thermal to seven parts epithermal + fast, 600 K moderator
//! let flux = FluxTypical::new(&bins, 1.0, 1.0 / 7.0, 600.0).unwrap();
//!
//! // group-averaged flux densities ready for an unfolding code
//! let spectrum = flux.spectrum();
//! assert_eq!(spectrum.groups(), 99);
//! ```
//!
//! ## Core concepts
//!
//! ### Regimes
//!
//! Three flux shapes implement the [Regime] trait:
//!
//! - [Thermal] - Maxwellian `sqrt(E) exp(-E/kT)`
//! - [Epithermal] - slowing down `1/E`
//! - [Fast] - U-235 fission `exp(-aE) sinh(sqrt(bE))`
//!
//! ### Calibration
//!
//! The thermal/epithermal transition `E1` is chosen so that the integrated
//! thermal flux over the integrated epithermal + fast flux matches the target
//! ratio. The epithermal/fast transition `E2` is fixed at 1 MeV and the
//! spectrum ends at 20 MeV.
//!
//! Rather than solving for `E1` directly, the [Balance] ratio is tabulated
//! over log-spaced candidates in a [CalibrationTable] and read backwards by
//! linear interpolation. A target outside of the table is reported as
//! [Error::CalibrationOutOfRange] instead of being extrapolated.
//!
//! Scale factors then make the flux continuous at both transitions, giving a
//! [CalibratedModel].
//!
//! ### Discretisation
//!
//! Each group value is the integral of the continuous model over the group
//! divided by the group width. Integrals are split at the transitions so
//! every piece covers a single smooth regime.
//!
//! ### Configuration
//!
//! A [FluxConfig] bundles everything needed to build a spectrum and can be
//! read from JSON with [read_config()].

mod calibration;
mod config;
mod error;
mod model;
mod regime;
mod typical;

pub mod constants;

#[doc(inline)]
pub use calibration::{calibrate, Balance, CalibrationSettings, CalibrationTable, RegimeParameters};

#[doc(inline)]
pub use config::{read_config, Bins, FluxConfig};

#[doc(inline)]
pub use model::CalibratedModel;

#[doc(inline)]
pub use regime::{Epithermal, Fast, Regime, RegimeKind, Thermal};

#[doc(inline)]
pub use typical::FluxTypical;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(no_inline)]
pub use nflux_quadrature::Tolerance;
