// crate modules
use crate::calibration::{calibrate, CalibrationSettings, RegimeParameters};
use crate::error::Result;
use crate::model::{check_bins, check_scaling, CalibratedModel};

// nflux modules
use nflux_spectrum::Spectrum;

/// Typical reactor flux spectrum over a given group structure
///
/// Calibrates the continuous model once on construction, then discretises it
/// over `bins` into group-averaged flux densities. The discrete values are
/// held as a [Spectrum] with `is_density = false` and `dfde = true`.
///
/// ```rust
/// # use nflux_typical::FluxTypical;
/// # use nflux_utils::logspace;
/// // group structure from 3.16 meV to 12.6 MeV
/// let bins = logspace(-2.5, 7.1, 100);
///
/// // thermal-to-fast ratio of 1/7 at 600 K
/// let flux = FluxTypical::new(&bins, 1.0, 1.0 / 7.0, 600.0).unwrap();
///
/// assert_eq!(flux.values().len(), 99);
/// assert!(flux.spectrum().dfde);
/// ```
#[derive(Debug, Clone)]
pub struct FluxTypical {
    parameters: RegimeParameters,
    model: CalibratedModel,
    spectrum: Spectrum,
}

impl FluxTypical {
    /// Calibrate and discretise with the default numerical settings
    ///
    /// - `bins` - strictly increasing group edges within (0, 20 MeV]
    /// - `scaling` - linear factor applied to every group value
    /// - `target_ratio` - thermal flux over epithermal + fast flux
    /// - `thermal_temperature` - moderator temperature in K
    pub fn new(
        bins: &[f64],
        scaling: f64,
        target_ratio: f64,
        thermal_temperature: f64,
    ) -> Result<Self> {
        let parameters = RegimeParameters::new(thermal_temperature, target_ratio)?;
        Self::with_settings(bins, scaling, parameters, &CalibrationSettings::default())
    }

    /// Calibrate and discretise with explicit numerical settings
    pub fn with_settings(
        bins: &[f64],
        scaling: f64,
        parameters: RegimeParameters,
        settings: &CalibrationSettings,
    ) -> Result<Self> {
        // fail on the cheap checks before calibrating
        check_bins(bins)?;
        check_scaling(scaling)?;

        let model = calibrate(&parameters, settings)?;
        let values = model.discretise(bins, scaling)?;
        let spectrum = Spectrum::new(bins.to_vec(), values, false, true)?;

        Ok(Self {
            parameters,
            model,
            spectrum,
        })
    }

    /// Flux per unit energy at `energy` (eV)
    pub fn flux(&self, energy: f64) -> Result<f64> {
        self.model.flux(energy)
    }

    /// Discretise the same calibrated model over a different group structure
    ///
    /// The model is not recalibrated, only integrated over the new bins.
    pub fn rebin(&self, bins: &[f64], scaling: f64) -> Result<Spectrum> {
        let values = self.model.discretise(bins, scaling)?;
        Ok(Spectrum::new(bins.to_vec(), values, false, true)?)
    }

    /// Inputs the model was calibrated for
    pub fn parameters(&self) -> &RegimeParameters {
        &self.parameters
    }

    /// Calibrated continuous model
    pub fn model(&self) -> &CalibratedModel {
        &self.model
    }

    /// Discrete group-averaged spectrum
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Group edges (eV)
    pub fn bins(&self) -> &[f64] {
        &self.spectrum.edges
    }

    /// Group-averaged flux densities, one per group
    pub fn values(&self) -> &[f64] {
        &self.spectrum.values
    }

    /// Hand over the discrete spectrum
    pub fn into_spectrum(self) -> Spectrum {
        self.spectrum
    }
}
