//! Configuration documents for building a typical spectrum

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::calibration::{CalibrationSettings, RegimeParameters};
use crate::constants::DEFAULT_TEMPERATURE;
use crate::error::{Error, Result};
use crate::typical::FluxTypical;

// nflux modules
use nflux_utils::{f, logspace};

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Group structure, either explicit or log-spaced
///
/// Deserialises from either a plain list of edges or an object describing a
/// log10 grid.
///
/// ```json
/// [1e-3, 1.0, 1e3, 1e6]
/// ```
///
/// ```json
/// { "log_start": -2.5, "log_stop": 7.1, "points": 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bins {
    /// Explicit group edges (eV)
    Edges(Vec<f64>),
    /// `points` edges from `10^log_start` to `10^log_stop` eV
    LogSpaced {
        log_start: f64,
        log_stop: f64,
        points: usize,
    },
}

impl Bins {
    /// Group edges (eV)
    pub fn edges(&self) -> Vec<f64> {
        match self {
            Self::Edges(edges) => edges.clone(),
            Self::LogSpaced {
                log_start,
                log_stop,
                points,
            } => logspace(*log_start, *log_stop, *points),
        }
    }
}

/// Everything needed to build a [FluxTypical]
///
/// Only the bins and the target ratio are required, everything else falls
/// back to a sensible default.
///
/// ```rust
/// # use nflux_typical::FluxConfig;
/// let config: FluxConfig = serde_json::from_str(r#"{
///     "bins": { "log_start": -2.5, "log_stop": 7.1, "points": 100 },
///     "target_ratio": 0.142857
/// }"#).unwrap();
///
/// assert_eq!(config.scaling, 1.0);
/// assert_eq!(config.thermal_temperature, 600.0);
/// assert_eq!(config.calibration.points, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxConfig {
    /// Group structure
    pub bins: Bins,
    /// Linear factor applied to every group value
    #[serde(default = "default_scaling")]
    pub scaling: f64,
    /// Ratio of thermal to epithermal + fast flux
    pub target_ratio: f64,
    /// Moderator temperature (K)
    #[serde(default = "default_temperature")]
    pub thermal_temperature: f64,
    /// Numerical settings for calibration
    #[serde(default)]
    pub calibration: CalibrationSettings,
}

impl FluxConfig {
    /// Calibrate and discretise as described by the configuration
    pub fn build(&self) -> Result<FluxTypical> {
        let parameters = RegimeParameters::new(self.thermal_temperature, self.target_ratio)?;
        FluxTypical::with_settings(
            &self.bins.edges(),
            self.scaling,
            parameters,
            &self.calibration,
        )
    }
}

/// Read a JSON [FluxConfig]
///
/// The `path` takes anything that can be turned into a `Path` reference, such
/// as a [&str], [String], [Path], etc...
///
/// ```rust, no_run
/// # use nflux_typical::read_config;
/// let flux = read_config("path/to/config.json").unwrap().build().unwrap();
/// ```
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<FluxConfig> {
    let path: &Path = path.as_ref();
    info!("Reading {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let config: FluxConfig = serde_json::from_reader(reader)?;

    if let Bins::LogSpaced { points, .. } = config.bins {
        if points < 2 {
            return Err(Error::InvalidParameter(f!(
                "log-spaced bins need at least 2 points, found {points}"
            )));
        }
    }

    Ok(config)
}

fn default_scaling() -> f64 {
    1.0
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
