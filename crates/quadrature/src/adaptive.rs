//! Globally adaptive bisection over Gauss-Kronrod segments

// crate modules
use crate::error::{Error, Result};
use crate::kronrod::Segment;

// external crates
use log::trace;
use serde::{Deserialize, Serialize};

/// Convergence criteria for adaptive integration
///
/// Integration stops once the summed error estimate falls below
/// `max(absolute, relative * |result|)`. The `limit` caps the number of
/// subintervals before giving up.
///
/// The defaults mirror the tolerances common to most numerical libraries,
/// i.e. a relative tolerance of ~1.49e-8.
///
/// ```rust
/// # use nflux_quadrature::Tolerance;
/// let tolerance = Tolerance::default();
/// assert_eq!(tolerance.relative, 1.49e-8);
/// assert_eq!(tolerance.absolute, 0.0);
/// assert_eq!(tolerance.limit, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Relative error tolerance
    pub relative: f64,
    /// Absolute error tolerance
    pub absolute: f64,
    /// Maximum number of subintervals
    pub limit: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1.49e-8,
            absolute: 0.0,
            limit: 500,
        }
    }
}

impl Tolerance {
    /// Tolerance with a given relative error and default everything else
    pub fn relative(relative: f64) -> Self {
        Self {
            relative,
            ..Default::default()
        }
    }

    /// Error budget for a given integral value
    fn target(&self, value: f64) -> f64 {
        self.absolute.max(self.relative * value.abs())
    }
}

/// Result of an adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Integral value
    pub value: f64,
    /// Summed absolute error estimate
    pub error: f64,
    /// Number of subintervals used
    pub intervals: usize,
}

/// Definite integral of `f` over `[lower, upper]`
///
/// Convenience wrapper around [integrate_estimate()] for when only the value
/// is of interest.
///
/// ```rust
/// # use nflux_quadrature::{integrate, Tolerance};
/// # use approx::assert_relative_eq;
/// // integrable singularity in the derivative at zero
/// let value = integrate(|x: f64| x.sqrt(), 0.0, 4.0, &Tolerance::default()).unwrap();
/// assert_relative_eq!(value, 16.0 / 3.0, max_relative = 1e-8);
/// ```
pub fn integrate<F>(f: F, lower: f64, upper: f64, tolerance: &Tolerance) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    Ok(integrate_estimate(f, lower, upper, tolerance)?.value)
}

/// Definite integral of `f` over `[lower, upper]` with its error estimate
///
/// The interval is repeatedly bisected, always splitting the subinterval with
/// the largest error estimate, until the total error satisfies the
/// [Tolerance]. This concentrates effort where the integrand changes quickly,
/// such as the peak of a Maxwellian or the cutoff of a fission spectrum.
///
/// A zero-width interval is simply zero. Bounds must be finite and ascending.
///
/// Failure to converge is always an error rather than a poor value:
///
/// - [Error::SubdivisionLimit] if the limit is reached
/// - [Error::RoundoffLimit] if a subinterval can no longer be bisected
/// - [Error::NonFiniteIntegrand] if `f` returns NAN or infinity
///
/// ```rust
/// # use nflux_quadrature::{integrate_estimate, Tolerance};
/// # use approx::assert_relative_eq;
/// let estimate = integrate_estimate(|x: f64| (-x).exp(), 0.0, 50.0, &Tolerance::default()).unwrap();
/// assert_relative_eq!(estimate.value, 1.0, max_relative = 1e-8);
/// assert!(estimate.error <= 1.49e-8);
/// ```
pub fn integrate_estimate<F>(f: F, lower: f64, upper: f64, tolerance: &Tolerance) -> Result<Estimate>
where
    F: Fn(f64) -> f64,
{
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(Error::InvalidInterval { lower, upper });
    }

    if lower == upper {
        return Ok(Estimate {
            value: 0.0,
            error: 0.0,
            intervals: 0,
        });
    }

    let mut segments = vec![Segment::new(&f, lower, upper)?];

    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();

        if error <= tolerance.target(value) {
            trace!(
                "Integrated [{lower:e}, {upper:e}] = {value:e} (+/- {error:e}, {} intervals)",
                segments.len()
            );
            return Ok(Estimate {
                value,
                error,
                intervals: segments.len(),
            });
        }

        if segments.len() >= tolerance.limit {
            return Err(Error::SubdivisionLimit {
                limit: tolerance.limit,
                result: value,
                error,
                tolerance: tolerance.target(value),
            });
        }

        // bisect whichever subinterval contributes the most error
        let worst = worst_segment(&segments);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.lower + segment.upper);

        if mid <= segment.lower || mid >= segment.upper {
            return Err(Error::RoundoffLimit {
                lower: segment.lower,
                upper: segment.upper,
            });
        }

        segments.push(Segment::new(&f, segment.lower, mid)?);
        segments.push(Segment::new(&f, mid, segment.upper)?);
    }
}

/// Index of the segment with the largest error estimate
fn worst_segment(segments: &[Segment]) -> usize {
    segments
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.error.total_cmp(&b.1.error))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_width_interval() {
        let estimate = integrate_estimate(|x: f64| 1.0 / x, 2.0, 2.0, &Tolerance::default()).unwrap();
        assert_eq!(estimate.value, 0.0);
        assert_eq!(estimate.intervals, 0);
    }

    #[test]
    fn reversed_or_undefined_bounds() {
        let tolerance = Tolerance::default();
        assert_eq!(
            integrate(|x| x, 2.0, 1.0, &tolerance),
            Err(Error::InvalidInterval {
                lower: 2.0,
                upper: 1.0
            })
        );
        assert!(integrate(|x| x, 0.0, f64::INFINITY, &tolerance).is_err());
        assert!(integrate(|x| x, f64::NAN, 1.0, &tolerance).is_err());
    }

    #[test]
    fn subdivision_limit_is_an_error() {
        let tolerance = Tolerance {
            relative: 1e-14,
            absolute: 0.0,
            limit: 2,
        };
        let result = integrate(|x: f64| (50.0 * x).sin().abs(), 0.0, 10.0, &tolerance);
        assert!(matches!(result, Err(Error::SubdivisionLimit { limit: 2, .. })));
    }

    #[test]
    fn peaked_integrand_is_resolved() {
        // narrow gaussian far from the centre of the interval
        let sigma: f64 = 0.05;
        let f = |x: f64| (-0.5 * ((x - 0.3) / sigma).powi(2)).exp();
        let value = integrate(f, 0.0, 10.0, &Tolerance::default()).unwrap();
        let expected = sigma * (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(value, expected, max_relative = 1e-7);
    }
}
