//! Continuous flux model and its discretisation

// crate modules
use crate::constants::{EPITHERMAL_FAST_TRANSITION, UPPER_ENERGY};
use crate::error::{Error, Result};
use crate::regime::{Epithermal, Fast, Regime, RegimeKind, Thermal};

// nflux modules
use nflux_quadrature::Tolerance;
use nflux_utils::{f, SliceExt, ValueExt};

// external crates
use log::trace;
use rayon::prelude::*;

/// Calibrated three-regime flux model
///
/// Evaluates the flux at any energy in `(0, 20 MeV]`:
///
/// | Energy range   | Flux                              |
/// | -------------- | --------------------------------- |
/// | `E <= E1`      | `scale_thermal * thermal(E)`      |
/// | `E1 < E <= E2` | `scale_epithermal * epithermal(E)`|
/// | `E > E2`       | `scale_fast * fast(E)`            |
///
/// The scale factors are fixed at construction so that the flux is
/// continuous across both transitions. Nothing is recalibrated afterwards,
/// a new set of parameters needs a new model.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedModel {
    transition_energy_1: f64,
    transition_energy_2: f64,
    scale_thermal: f64,
    scale_epithermal: f64,
    scale_fast: f64,
    thermal: Thermal,
    fast: Fast,
    tolerance: Tolerance,
}

impl CalibratedModel {
    /// Stitch the regimes together at a known thermal/epithermal transition
    pub(crate) fn new(
        thermal: Thermal,
        fast: Fast,
        transition: f64,
        tolerance: Tolerance,
    ) -> Result<Self> {
        if !(transition > 0.0 && transition < EPITHERMAL_FAST_TRANSITION) {
            return Err(Error::InvalidParameter(f!(
                "thermal/epithermal transition must be in (0, {EPITHERMAL_FAST_TRANSITION}) eV, found {transition}"
            )));
        }

        let scale_thermal = 1.0;
        let scale_epithermal = scale_thermal * thermal.flux(transition) / Epithermal.flux(transition);
        let scale_fast = scale_epithermal * Epithermal.flux(EPITHERMAL_FAST_TRANSITION)
            / fast.flux(EPITHERMAL_FAST_TRANSITION);

        if !(scale_epithermal > 0.0 && scale_fast > 0.0) {
            return Err(Error::InvalidParameter(f!(
                "Maxwellian vanishes at the transition {transition} eV, flux can not be made continuous"
            )));
        }

        Ok(Self {
            transition_energy_1: transition,
            transition_energy_2: EPITHERMAL_FAST_TRANSITION,
            scale_thermal,
            scale_epithermal,
            scale_fast,
            thermal,
            fast,
            tolerance,
        })
    }

    /// Calibrated thermal/epithermal transition (eV)
    pub fn transition_energy_1(&self) -> f64 {
        self.transition_energy_1
    }

    /// Fixed epithermal/fast transition (eV)
    pub fn transition_energy_2(&self) -> f64 {
        self.transition_energy_2
    }

    /// Scale applied to the Maxwellian, always one
    pub fn scale_thermal(&self) -> f64 {
        self.scale_thermal
    }

    /// Scale applied to 1/E for continuity at the first transition
    pub fn scale_epithermal(&self) -> f64 {
        self.scale_epithermal
    }

    /// Scale applied to the fission shape for continuity at the second transition
    pub fn scale_fast(&self) -> f64 {
        self.scale_fast
    }

    /// Which regime governs the flux at `energy`
    ///
    /// Energies exactly on a transition belong to the regime below.
    pub fn regime_of(&self, energy: f64) -> RegimeKind {
        if energy <= self.transition_energy_1 {
            RegimeKind::Thermal
        } else if energy <= self.transition_energy_2 {
            RegimeKind::Epithermal
        } else {
            RegimeKind::Fast
        }
    }

    /// Flux per unit energy at `energy` (eV)
    ///
    /// Only defined within `(0, 20 MeV]`, anything else is an
    /// [Error::InvalidParameter].
    pub fn flux(&self, energy: f64) -> Result<f64> {
        check_energy(energy)?;
        Ok(match self.regime_of(energy) {
            RegimeKind::Thermal => self.scale_thermal * self.thermal.flux(energy),
            RegimeKind::Epithermal => self.scale_epithermal * Epithermal.flux(energy),
            RegimeKind::Fast => self.scale_fast * self.fast.flux(energy),
        })
    }

    /// Integral of the flux over `[lower, upper]`
    ///
    /// The interval is split at both transitions so every piece is integrated
    /// over a single smooth regime. The lower bound may be zero since the
    /// Maxwellian is integrable there.
    pub fn integrate(&self, lower: f64, upper: f64) -> Result<f64> {
        if !(lower >= 0.0 && lower <= upper && upper <= UPPER_ENERGY) {
            return Err(Error::InvalidParameter(f!(
                "integration bounds must satisfy 0 <= lower <= upper <= {UPPER_ENERGY} eV, found [{lower}, {upper}]"
            )));
        }

        let e1 = self.transition_energy_1;
        let e2 = self.transition_energy_2;
        let mut total = 0.0;

        let (lo, hi) = (lower, upper.min(e1));
        if lo < hi {
            total += self.scale_thermal * self.thermal.integral(lo, hi, &self.tolerance)?;
        }

        let (lo, hi) = (lower.max(e1), upper.min(e2));
        if lo < hi {
            total += self.scale_epithermal * Epithermal.integral(lo, hi, &self.tolerance)?;
        }

        let (lo, hi) = (lower.max(e2), upper);
        if lo < hi {
            total += self.scale_fast * self.fast.integral(lo, hi, &self.tolerance)?;
        }

        Ok(total)
    }

    /// Average flux per unit energy over `[lower, upper]`
    pub fn group_average(&self, lower: f64, upper: f64) -> Result<f64> {
        if !(lower < upper) {
            return Err(Error::InvalidParameter(f!(
                "group must have positive width, found [{lower}, {upper}]"
            )));
        }
        Ok(self.integrate(lower, upper)? / (upper - lower))
    }

    /// Group-averaged flux density for every bin
    ///
    /// Each group value is the integral of the flux over the bin divided by
    /// the bin width, multiplied by `scaling`. The result has one fewer
    /// entry than `bins` and keeps the same order. Bins are integrated in
    /// parallel.
    pub fn discretise(&self, bins: &[f64], scaling: f64) -> Result<Vec<f64>> {
        check_bins(bins)?;
        check_scaling(scaling)?;

        bins.par_windows(2)
            .map(|pair| -> Result<f64> {
                let value = self.group_average(pair[0], pair[1])? * scaling;
                trace!(
                    "Group {} - {} eV: {}",
                    pair[0].sci(4, 2),
                    pair[1].sci(4, 2),
                    value.sci(4, 2)
                );
                Ok(value)
            })
            .collect()
    }

    /// Realised ratio of thermal to epithermal + fast flux
    ///
    /// Should reproduce the calibration target to within the resolution of
    /// the calibration table.
    pub fn thermal_to_fast_ratio(&self) -> Result<f64> {
        let thermal = self.integrate(0.0, self.transition_energy_1)?;
        let rest = self.integrate(self.transition_energy_1, UPPER_ENERGY)?;
        Ok(thermal / rest)
    }
}

/// Energies must lie within the model domain
fn check_energy(energy: f64) -> Result<()> {
    if energy > 0.0 && energy <= UPPER_ENERGY {
        Ok(())
    } else {
        Err(Error::InvalidParameter(f!(
            "energy must be in (0, {UPPER_ENERGY}] eV, found {energy}"
        )))
    }
}

/// Group structure must be usable by the model
pub(crate) fn check_bins(bins: &[f64]) -> Result<()> {
    if bins.len() < 2 {
        return Err(Error::InvalidParameter(f!(
            "at least 2 energy bin edges are required, found {}",
            bins.len()
        )));
    }

    bins.check_increasing()
        .map_err(|e| Error::InvalidParameter(f!("energy bins must be strictly increasing ({e})")))?;

    check_energy(bins[0])?;
    check_energy(bins[bins.len() - 1])
}

/// Scaling only needs to be a real number
pub(crate) fn check_scaling(scaling: f64) -> Result<()> {
    if scaling.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(f!(
            "scaling must be finite, found {scaling}"
        )))
    }
}
