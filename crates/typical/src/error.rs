//! Result and Error types for nflux-typical

/// Type alias for Result<T, typical::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `nflux-typical` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to (de)serialise")]
    FailedSerde(#[from] serde_json::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "target ratio {target:?} is outside of the tabulated range [{lower:?}, {upper:?}]"
    )]
    CalibrationOutOfRange { target: f64, lower: f64, upper: f64 },

    #[error("integration failure: {0}")]
    IntegrationFailure(#[from] nflux_quadrature::Error),

    #[error("failed to build spectrum")]
    SpectrumError(#[from] nflux_spectrum::Error),

    #[error("failure in table operations: {0}")]
    UtilsError(#[from] nflux_utils::Error),
}
