//! Physical constants and fixed energies of the flux model
//!
//! All energies are in eV and temperatures in K.

/// Boltzmann constant (eV/K)
pub const BOLTZMANN: f64 = 8.617_333_262e-5;

/// Exponential decay constant of the U-235 fission spectrum (1/eV)
///
/// From the fit `chi(E) = 0.453 exp(-1.036 E) sinh(sqrt(2.29 E))` with `E` in
/// MeV, converted to eV.
pub const FISSION_DECAY: f64 = 1.036e-6;

/// Constant under the square root of the U-235 fission spectrum (1/eV)
pub const FISSION_SHAPE: f64 = 2.29e-6;

/// Fixed transition between the epithermal and fast regimes (eV)
pub const EPITHERMAL_FAST_TRANSITION: f64 = 1.0e6;

/// Upper bound of the model, end of the fast regime (eV)
pub const UPPER_ENERGY: f64 = 2.0e7;

/// Default number of candidate energies in the calibration table
pub const TABLE_POINTS: usize = 1000;

/// Default lowest candidate thermal/epithermal transition (eV)
pub const TABLE_LOWER: f64 = 1.0e-5;

/// Default highest candidate thermal/epithermal transition (eV)
pub const TABLE_UPPER: f64 = 1.0e1;

/// Default moderator temperature (K)
pub const DEFAULT_TEMPERATURE: f64 = 600.0;

/// Default ratio of thermal to epithermal + fast flux
pub const DEFAULT_RATIO: f64 = 2.0;
