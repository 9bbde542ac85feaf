//! Result and Error types for nflux-quadrature

/// Type alias for Result<T, quadrature::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `nflux-quadrature` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// Bounds that are undefined or in descending order
    #[error("invalid integration interval [{lower:?}, {upper:?}]")]
    InvalidInterval { lower: f64, upper: f64 },

    /// The integrand returned NAN or an infinite value
    #[error("integrand is not finite at x = {x:?}")]
    NonFiniteIntegrand { x: f64 },

    /// Ran out of subintervals before reaching the tolerance
    #[error(
        "no convergence after {limit:?} subintervals (result {result:?}, error {error:?}, tolerance {tolerance:?})"
    )]
    SubdivisionLimit {
        limit: usize,
        result: f64,
        error: f64,
        tolerance: f64,
    },

    /// Subintervals became too narrow to bisect in floating point
    #[error("roundoff prevents further bisection near [{lower:?}, {upper:?}]")]
    RoundoffLimit { lower: f64, upper: f64 },
}
