//! Result and Error types for nflux-spectrum

/// Type alias for `Result<T, spectrum::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `nflux-spectrum`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Failure in common slice operations, e.g. unordered edges
    #[error("invalid group structure: {0}")]
    Utils(#[from] nflux_utils::Error),

    /// Need at least one group
    #[error("at least 2 group edges are required (found {0:?})")]
    BelowMinimumEdges(usize),

    /// Group values do not line up with the edges
    #[error("expected one value per group (expected {expected:?}, found {found:?})")]
    MismatchedLength { expected: usize, found: usize },

    /// Total is zero or undefined so can not be normalised
    #[error("spectrum total of {0:?} can not be normalised")]
    UndefinedTotal(f64),
}
