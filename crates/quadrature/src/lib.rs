//! Adaptive numerical integration
//!
//! A small globally adaptive integrator built on the 7-point Gauss and
//! 15-point Kronrod rule pair. It is used throughout `nflux` for integrating
//! flux shapes that vary over many orders of magnitude.
//!
//! ```rust
//! # use nflux_quadrature::{integrate, Tolerance};
//! # use approx::assert_relative_eq;
//! // Maxwellian shape at 600 K (kT in eV)
//! let kt: f64 = 8.617333262e-5 * 600.0;
//! let maxwellian = |e: f64| e.sqrt() * (-e / kt).exp();
//!
//! let value = integrate(maxwellian, 0.0, 10.0, &Tolerance::default()).unwrap();
//! let exact = 0.5 * std::f64::consts::PI.sqrt() * kt.powf(1.5);
//! assert_relative_eq!(value, exact, max_relative = 1e-7);
//! ```
//!
//! Integration never silently returns a bad value. Anything that fails to
//! converge, or an integrand that evaluates to something undefined, is
//! reported as an [Error].

mod adaptive;
mod error;
mod kronrod;

#[doc(inline)]
pub use adaptive::{integrate, integrate_estimate, Estimate, Tolerance};

#[doc(inline)]
pub use error::{Error, Result};
