//! Calibration of the thermal/epithermal transition energy

// crate modules
use crate::constants::{
    DEFAULT_RATIO, DEFAULT_TEMPERATURE, EPITHERMAL_FAST_TRANSITION, TABLE_LOWER, TABLE_POINTS,
    TABLE_UPPER, UPPER_ENERGY,
};
use crate::error::{Error, Result};
use crate::model::CalibratedModel;
use crate::regime::{Epithermal, Fast, Regime, Thermal};

// nflux modules
use nflux_quadrature::Tolerance;
use nflux_utils::{f, interpolate, logspace, SliceExt, ValueExt};

// external crates
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical inputs to the calibration
///
/// - `thermal_temperature` - moderator temperature (K)
/// - `target_ratio` - integrated thermal flux over integrated epithermal +
///   fast flux
///
/// Both must be finite and strictly positive.
///
/// ```rust
/// # use nflux_typical::RegimeParameters;
/// assert!(RegimeParameters::new(600.0, 1.0 / 7.0).is_ok());
/// assert!(RegimeParameters::new(600.0, 0.0).is_err());
/// assert!(RegimeParameters::new(-1.0, 2.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeParameters {
    thermal_temperature: f64,
    target_ratio: f64,
}

impl RegimeParameters {
    /// Validated calibration inputs
    pub fn new(thermal_temperature: f64, target_ratio: f64) -> Result<Self> {
        check_positive("thermal temperature", thermal_temperature)?;
        check_positive("target ratio", target_ratio)?;
        Ok(Self {
            thermal_temperature,
            target_ratio,
        })
    }

    /// Moderator temperature (K)
    pub fn thermal_temperature(&self) -> f64 {
        self.thermal_temperature
    }

    /// Ratio of thermal to epithermal + fast flux
    pub fn target_ratio(&self) -> f64 {
        self.target_ratio
    }
}

impl Default for RegimeParameters {
    /// A 600 K moderator with twice as much thermal flux as anything else
    fn default() -> Self {
        Self {
            thermal_temperature: DEFAULT_TEMPERATURE,
            target_ratio: DEFAULT_RATIO,
        }
    }
}

/// Numerical settings for calibration
///
/// The transition energy is found by tabulating the thermal-to-fast ratio at
/// `points` log-spaced candidate energies between `lower` and `upper`, then
/// reading the table backwards. The `tolerance` is used for every integral.
///
/// ```rust
/// # use nflux_typical::CalibrationSettings;
/// let settings = CalibrationSettings::default();
/// assert_eq!(settings.points, 1000);
/// assert_eq!(settings.lower, 1.0e-5);
/// assert_eq!(settings.upper, 1.0e1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Number of candidate transition energies
    pub points: usize,
    /// Lowest candidate energy (eV)
    pub lower: f64,
    /// Highest candidate energy (eV)
    pub upper: f64,
    /// Quadrature convergence criteria
    pub tolerance: Tolerance,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            points: TABLE_POINTS,
            lower: TABLE_LOWER,
            upper: TABLE_UPPER,
            tolerance: Tolerance::default(),
        }
    }
}

impl CalibrationSettings {
    /// Check the table domain is usable
    ///
    /// Candidates must sit below the epithermal/fast transition, otherwise
    /// the epithermal regime would have negative width.
    pub fn validate(&self) -> Result<()> {
        if self.points < 2 {
            return Err(Error::InvalidParameter(f!(
                "calibration table needs at least 2 points, found {}",
                self.points
            )));
        }

        check_positive("table lower energy", self.lower)?;

        if !(self.upper > self.lower && self.upper < EPITHERMAL_FAST_TRANSITION) {
            return Err(Error::InvalidParameter(f!(
                "table upper energy must be in ({}, {}) eV, found {}",
                self.lower,
                EPITHERMAL_FAST_TRANSITION,
                self.upper
            )));
        }

        if !(self.tolerance.relative >= 0.0 && self.tolerance.absolute >= 0.0) {
            return Err(Error::InvalidParameter(
                "quadrature tolerances must be non-negative".into(),
            ));
        }

        Ok(())
    }
}

/// Balance of thermal against epithermal + fast flux
///
/// For a candidate transition energy `x`, the three regimes are stitched
/// together continuously and integrated:
///
/// ```text
/// A      = int_0^x thermal
/// S(x)   = thermal(x) / epithermal(x)
/// B      = S(x) int_x^E2 epithermal
/// C      = S(x) epithermal(E2) / fast(E2) int_E2^Emax fast
/// Q(x)   = A / (B + C)
/// ```
///
/// The fast integral does not depend on `x` so is evaluated once up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    thermal: Thermal,
    fast: Fast,
    /// epithermal(E2) / fast(E2) * int_E2^Emax fast
    fast_tail: f64,
    tolerance: Tolerance,
}

impl Balance {
    /// Set up the balance for a given temperature and fission shape
    pub fn new(thermal: Thermal, fast: Fast, tolerance: Tolerance) -> Result<Self> {
        let fast_integral = fast.integral(EPITHERMAL_FAST_TRANSITION, UPPER_ENERGY, &tolerance)?;
        let fast_tail = Epithermal.flux(EPITHERMAL_FAST_TRANSITION)
            / fast.flux(EPITHERMAL_FAST_TRANSITION)
            * fast_integral;

        Ok(Self {
            thermal,
            fast,
            fast_tail,
            tolerance,
        })
    }

    /// Raw thermal-to-fast ratio `Q(x)` for a candidate transition energy
    ///
    /// Far above the Maxwellian peak the continuity scale underflows and the
    /// ratio is infinite.
    pub fn ratio(&self, energy: f64) -> Result<f64> {
        if !(energy > 0.0 && energy <= EPITHERMAL_FAST_TRANSITION) {
            return Err(Error::InvalidParameter(f!(
                "candidate transition must be in (0, {EPITHERMAL_FAST_TRANSITION}] eV, found {energy}"
            )));
        }

        let thermal = self.thermal.integral(0.0, energy, &self.tolerance)?;
        let scale = self.thermal.flux(energy) / Epithermal.flux(energy);
        let epithermal =
            scale * Epithermal.integral(energy, EPITHERMAL_FAST_TRANSITION, &self.tolerance)?;
        let fast = scale * self.fast_tail;

        Ok(thermal / (epithermal + fast))
    }

    /// Absolute deviation `|Q(x) - target|` from a target ratio
    pub fn deviation(&self, energy: f64, target: f64) -> Result<f64> {
        Ok((self.ratio(energy)? - target).abs())
    }

    /// The Maxwellian this balance was built for
    pub fn thermal(&self) -> Thermal {
        self.thermal
    }

    /// The fission shape this balance was built for
    pub fn fast(&self) -> Fast {
        self.fast
    }
}

/// Tabulated thermal-to-fast ratio against candidate transition energy
///
/// Inverting the table by linear interpolation avoids the need for any
/// derivative of a function built from quadrature. Only finite ratios are
/// kept.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    /// Candidate transition energies (eV)
    pub energies: Vec<f64>,
    /// Ratio `Q(x)` at each candidate
    pub ratios: Vec<f64>,
}

impl CalibrationTable {
    /// Evaluate the balance at every candidate energy
    ///
    /// Candidates are independent, so the table is filled in parallel.
    pub fn tabulate(balance: &Balance, settings: &CalibrationSettings) -> Result<Self> {
        settings.validate()?;

        debug!(
            "Tabulating {} candidates over {} - {} eV",
            settings.points,
            settings.lower.sci(2, 2),
            settings.upper.sci(2, 2)
        );

        let candidates = logspace(settings.lower.log10(), settings.upper.log10(), settings.points);
        let ratios = candidates
            .par_iter()
            .map(|energy| balance.ratio(*energy))
            .collect::<Result<Vec<f64>>>()?;

        let (energies, ratios): (Vec<f64>, Vec<f64>) = candidates
            .into_iter()
            .zip(ratios)
            .filter(|(_, ratio)| ratio.is_finite())
            .unzip();

        let skipped = settings.points - energies.len();
        if skipped > 0 {
            warn!("Skipped {skipped} candidates with an undefined thermal-to-fast ratio");
        }

        if energies.len() < 2 {
            return Err(Error::InvalidParameter(f!(
                "only {} usable calibration candidates between {} and {} eV",
                energies.len(),
                settings.lower,
                settings.upper
            )));
        }

        if ratios.windows(2).any(|pair| pair[1] <= pair[0]) {
            warn!("Thermal-to-fast ratio is not monotonic, using the first matching candidate");
        }

        let table = Self { energies, ratios };
        let (lower, upper) = table.range()?;
        debug!("Tabulated ratios span {} - {}", lower.sci(3, 2), upper.sci(3, 2));

        Ok(table)
    }

    /// Smallest and largest tabulated ratio
    pub fn range(&self) -> Result<(f64, f64)> {
        Ok((self.ratios.try_min()?, self.ratios.try_max()?))
    }

    /// Transition energy giving the `target` ratio
    ///
    /// Targets outside the tabulated range are an error, never extrapolated.
    pub fn invert(&self, target: f64) -> Result<f64> {
        let (lower, upper) = self.range()?;
        if !(target >= lower && target <= upper) {
            return Err(Error::CalibrationOutOfRange {
                target,
                lower,
                upper,
            });
        }
        Ok(interpolate(target, &self.ratios, &self.energies)?)
    }
}

/// Calibrate the continuous flux model
///
/// Finds the thermal/epithermal transition reproducing the target ratio,
/// then fixes the scale factors that keep the flux continuous across both
/// transitions.
///
/// ```rust
/// # use nflux_typical::{calibrate, CalibrationSettings, RegimeParameters};
/// let parameters = RegimeParameters::new(600.0, 1.0 / 7.0).unwrap();
/// let model = calibrate(&parameters, &CalibrationSettings::default()).unwrap();
///
/// assert!(model.transition_energy_1() > 0.1);
/// assert!(model.transition_energy_1() < 0.2);
/// assert_eq!(model.transition_energy_2(), 1.0e6);
/// ```
pub fn calibrate(
    parameters: &RegimeParameters,
    settings: &CalibrationSettings,
) -> Result<CalibratedModel> {
    let thermal = Thermal::new(parameters.thermal_temperature());
    let fast = Fast::default();

    let balance = Balance::new(thermal, fast, settings.tolerance)?;
    let table = CalibrationTable::tabulate(&balance, settings)?;
    let transition = table.invert(parameters.target_ratio())?;

    let model = CalibratedModel::new(thermal, fast, transition, settings.tolerance)?;

    info!(
        "Calibrated {} K, ratio {}: E1 = {} eV, scales = ({}, {}, {})",
        parameters.thermal_temperature(),
        parameters.target_ratio().sci(4, 2),
        model.transition_energy_1().sci(4, 2),
        model.scale_thermal().sci(4, 2),
        model.scale_epithermal().sci(4, 2),
        model.scale_fast().sci(4, 2)
    );

    Ok(model)
}

/// Finite and strictly positive
pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(f!(
            "{name} must be finite and positive, found {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn balance() -> Balance {
        Balance::new(Thermal::new(600.0), Fast::default(), Tolerance::default()).unwrap()
    }

    #[test]
    fn ratio_increases_with_transition() {
        let balance = balance();
        let low = balance.ratio(1.0e-3).unwrap();
        let mid = balance.ratio(0.1).unwrap();
        let high = balance.ratio(1.0).unwrap();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn ratio_outside_epithermal_range() {
        let balance = balance();
        assert!(balance.ratio(0.0).is_err());
        assert!(balance.ratio(-1.0).is_err());
        assert!(balance.ratio(2.0e6).is_err());
    }

    #[test]
    fn deviation_is_absolute() {
        let balance = balance();
        let q = balance.ratio(0.1).unwrap();
        assert_relative_eq!(balance.deviation(0.1, q + 1.0).unwrap(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(balance.deviation(0.1, q - 1.0).unwrap(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn table_inversion_round_trip() {
        let balance = balance();
        let settings = CalibrationSettings {
            points: 200,
            ..Default::default()
        };
        let table = CalibrationTable::tabulate(&balance, &settings).unwrap();

        // reading a tabulated ratio back gives its energy
        let energy = table.invert(table.ratios[57]).unwrap();
        assert_relative_eq!(energy, table.energies[57], max_relative = 1e-12);
    }

    #[test]
    fn out_of_range_target_is_an_error() {
        let balance = balance();
        let settings = CalibrationSettings {
            points: 50,
            ..Default::default()
        };
        let table = CalibrationTable::tabulate(&balance, &settings).unwrap();
        let (lower, _) = table.range().unwrap();

        assert!(matches!(
            table.invert(0.5 * lower),
            Err(Error::CalibrationOutOfRange { .. })
        ));
    }

    #[test]
    fn settings_validation() {
        let bad = [
            CalibrationSettings {
                points: 1,
                ..Default::default()
            },
            CalibrationSettings {
                lower: 0.0,
                ..Default::default()
            },
            CalibrationSettings {
                upper: 1.0e-6,
                ..Default::default()
            },
            CalibrationSettings {
                upper: 1.0e7,
                ..Default::default()
            },
        ];

        for settings in bad {
            assert!(matches!(settings.validate(), Err(Error::InvalidParameter(_))));
        }
        assert!(CalibrationSettings::default().validate().is_ok());
    }
}
