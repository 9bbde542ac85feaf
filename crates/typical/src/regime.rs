//! Analytic flux shapes for each energy regime

// crate modules
use crate::constants::{BOLTZMANN, FISSION_DECAY, FISSION_SHAPE};
use crate::error::{Error, Result};

// nflux modules
use nflux_quadrature::{integrate, Tolerance};
use nflux_utils::f;

/// Common interface for the flux shape of a single regime
///
/// Shapes are unnormalised. Continuity between regimes is handled by the
/// scale factors of a [CalibratedModel](crate::CalibratedModel).
pub trait Regime: Sync {
    /// Flux per unit energy at `energy` (eV)
    fn flux(&self, energy: f64) -> f64;

    /// Definite integral of the flux over `[lower, upper]`
    ///
    /// Defaults to adaptive quadrature of [Regime::flux()].
    fn integral(&self, lower: f64, upper: f64, tolerance: &Tolerance) -> Result<f64> {
        Ok(integrate(|e| self.flux(e), lower, upper, tolerance)?)
    }
}

/// Identifies which regime applies to a given energy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegimeKind {
    /// Maxwellian, below the thermal/epithermal transition
    Thermal,
    /// Slowing down, between the two transitions
    Epithermal,
    /// Fission, above the epithermal/fast transition
    Fast,
}

impl std::fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Thermal => write!(f, "thermal"),
            Self::Epithermal => write!(f, "epithermal"),
            Self::Fast => write!(f, "fast"),
        }
    }
}

/// Maxwell-Boltzmann energy distribution
///
/// `sqrt(E) exp(-E / kT)`, with `kT` stored directly in eV.
///
/// ```rust
/// # use nflux_typical::{Regime, Thermal};
/// let thermal = Thermal::new(600.0);
///
/// // the distribution peaks at kT/2
/// let peak = 0.5 * thermal.kt;
/// assert!(thermal.flux(peak) > thermal.flux(0.9 * peak));
/// assert!(thermal.flux(peak) > thermal.flux(1.1 * peak));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermal {
    /// Characteristic energy kT (eV)
    pub kt: f64,
}

impl Thermal {
    /// Maxwellian for a temperature in K
    pub fn new(temperature: f64) -> Self {
        Self {
            kt: BOLTZMANN * temperature,
        }
    }
}

impl Regime for Thermal {
    fn flux(&self, energy: f64) -> f64 {
        energy.sqrt() * (-energy / self.kt).exp()
    }
}

/// Slowing down 1/E distribution
///
/// Integrates analytically, so no quadrature is needed for this regime.
///
/// ```rust
/// # use nflux_typical::{Epithermal, Regime};
/// # use nflux_quadrature::Tolerance;
/// let integral = Epithermal.integral(1.0, std::f64::consts::E, &Tolerance::default()).unwrap();
/// assert!((integral - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Epithermal;

impl Regime for Epithermal {
    fn flux(&self, energy: f64) -> f64 {
        1.0 / energy
    }

    fn integral(&self, lower: f64, upper: f64, _: &Tolerance) -> Result<f64> {
        // undefined at zero and for reversed bounds
        if !(lower > 0.0 && lower <= upper && upper.is_finite()) {
            return Err(Error::InvalidParameter(f!(
                "1/E integral requires 0 < lower <= upper, found [{lower}, {upper}]"
            )));
        }
        Ok((upper / lower).ln())
    }
}

/// U-235 fission (Watt) spectrum
///
/// `exp(-a E) sinh(sqrt(b E))`, defaulting to the constants for thermal
/// fission of U-235.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fast {
    /// Exponential decay constant (1/eV)
    pub a: f64,
    /// Constant under the square root (1/eV)
    pub b: f64,
}

impl Default for Fast {
    fn default() -> Self {
        Self {
            a: FISSION_DECAY,
            b: FISSION_SHAPE,
        }
    }
}

impl Regime for Fast {
    fn flux(&self, energy: f64) -> f64 {
        (-self.a * energy).exp() * (self.b * energy).sqrt().sinh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn thermal_integral_matches_gamma_function() {
        // int_0^inf sqrt(E) exp(-E/kT) dE = sqrt(pi)/2 kT^1.5
        let thermal = Thermal::new(600.0);
        let tolerance = Tolerance::default();
        let value = thermal.integral(0.0, 10.0, &tolerance).unwrap();
        assert_relative_eq!(value, 0.5 * PI.sqrt() * thermal.kt.powf(1.5), max_relative = 1e-7);
    }

    #[test]
    fn fast_integral_matches_closed_form() {
        // int_0^inf exp(-aE) sinh(sqrt(bE)) dE = sqrt(pi b / 4a^3) exp(b / 4a)
        let fast = Fast::default();
        let exact = (PI * fast.b / (4.0 * fast.a.powi(3))).sqrt() * (fast.b / (4.0 * fast.a)).exp();
        let value = fast.integral(0.0, 1.0e8, &Tolerance::default()).unwrap();
        assert_relative_eq!(value, exact, max_relative = 1e-6);
    }

    #[test]
    fn epithermal_rejects_zero() {
        let tolerance = Tolerance::default();
        assert!(Epithermal.integral(0.0, 1.0, &tolerance).is_err());
        assert!(Epithermal.integral(2.0, 1.0, &tolerance).is_err());
        assert_eq!(Epithermal.integral(3.0, 3.0, &tolerance).unwrap(), 0.0);
    }

    #[test]
    fn shapes_are_positive() {
        let thermal = Thermal::new(300.0);
        let fast = Fast::default();
        for energy in [1e-5, 1e-2, 0.5, 1.0e3, 1.0e6, 2.0e7] {
            assert!(thermal.flux(energy) >= 0.0);
            assert!(Epithermal.flux(energy) > 0.0);
            assert!(fast.flux(energy) > 0.0);
        }
    }
}
