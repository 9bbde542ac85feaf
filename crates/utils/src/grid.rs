//! Grid construction and table lookups

use crate::error::{Error, Result};

/// Evenly spaced values on a log10 scale
///
/// Returns `points` values from `10^start` to `10^stop` inclusive. A single
/// point returns just `10^start`, and zero points returns an empty vector.
///
/// ```rust
/// # use nflux_utils::logspace;
/// # use approx::assert_relative_eq;
/// let grid = logspace(-1.0, 2.0, 4);
/// assert_eq!(grid.len(), 4);
/// assert_relative_eq!(grid[0], 0.1, max_relative = 1e-12);
/// assert_relative_eq!(grid[1], 1.0, max_relative = 1e-12);
/// assert_relative_eq!(grid[3], 100.0, max_relative = 1e-12);
/// ```
pub fn logspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            (0..points)
                .map(|i| 10f64.powf(start + step * i as f64))
                .collect()
        }
    }
}

/// Piecewise linear interpolation of a tabulated function
///
/// Finds the first segment of `xp` that brackets `x` and linearly interpolates
/// between the corresponding `fp` values. The table does not need to be
/// sorted, which makes this safe to use for inverting a tabulated function by
/// swapping the roles of the two columns.
///
/// Values outside every segment are an error rather than an extrapolation.
///
/// ```rust
/// # use nflux_utils::interpolate;
/// let xp = [0.0, 1.0, 2.0];
/// let fp = [0.0, 10.0, 40.0];
///
/// assert_eq!(interpolate(0.5, &xp, &fp), Ok(5.0));
/// assert_eq!(interpolate(1.5, &xp, &fp), Ok(25.0));
/// assert_eq!(interpolate(2.0, &xp, &fp), Ok(40.0));
///
/// // never extrapolates
/// assert!(interpolate(2.5, &xp, &fp).is_err());
/// ```
pub fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> Result<f64> {
    if xp.len() != fp.len() {
        return Err(Error::MismatchedLength {
            left: xp.len(),
            right: fp.len(),
        });
    }

    if xp.len() < 2 {
        return Err(Error::BelowMinimumSliceLength {
            length: xp.len(),
            minimum_required: 2,
        });
    }

    for (x_pair, f_pair) in xp.windows(2).zip(fp.windows(2)) {
        let (x0, x1) = (x_pair[0], x_pair[1]);
        let (lower, upper) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };

        if x < lower || x > upper {
            continue;
        }

        // flat segment, any value in it is as good as another
        if x0 == x1 {
            return Ok(f_pair[0]);
        }

        let t = (x - x0) / (x1 - x0);
        return Ok(f_pair[0] + t * (f_pair[1] - f_pair[0]));
    }

    let finite = xp.iter().copied().filter(|v| v.is_finite());
    Err(Error::ValueOutsideOfBounds {
        value: x,
        lower_bound: finite.clone().fold(f64::INFINITY, f64::min),
        upper_bound: finite.fold(f64::NEG_INFINITY, f64::max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn logspace_matches_decades() {
        let grid = logspace(-5.0, 1.0, 7);
        for (i, value) in grid.iter().enumerate() {
            assert_relative_eq!(*value, 10f64.powi(i as i32 - 5), max_relative = 1e-12);
        }
    }

    #[test]
    fn logspace_degenerate_lengths() {
        assert!(logspace(0.0, 1.0, 0).is_empty());
        assert_eq!(logspace(2.0, 5.0, 1), vec![100.0]);
    }

    #[test]
    fn interpolate_inverts_monotonic_table() {
        // f(x) = x^2 tabulated, then read backwards
        let x: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();

        assert_relative_eq!(interpolate(49.0, &y, &x).unwrap(), 7.0);
        assert_relative_eq!(interpolate(50.0, &y, &x).unwrap(), 7.0 + 1.0 / 15.0);
    }

    #[test]
    fn interpolate_uses_first_bracketing_segment() {
        let xp = [0.0, 2.0, 1.0];
        let fp = [0.0, 20.0, 30.0];
        assert_eq!(interpolate(1.5, &xp, &fp), Ok(15.0));
    }

    #[test]
    fn interpolate_rejects_bad_tables() {
        assert_eq!(
            interpolate(0.5, &[0.0, 1.0], &[0.0]),
            Err(Error::MismatchedLength { left: 2, right: 1 })
        );
        assert_eq!(
            interpolate(0.5, &[0.0], &[0.0]),
            Err(Error::BelowMinimumSliceLength {
                length: 1,
                minimum_required: 2
            })
        );
        assert_eq!(
            interpolate(-1.0, &[0.0, 1.0, f64::INFINITY], &[0.0, 1.0, 2.0]),
            Err(Error::ValueOutsideOfBounds {
                value: -1.0,
                lower_bound: 0.0,
                upper_bound: 1.0
            })
        );
    }
}
