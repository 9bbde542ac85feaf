use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// # use nflux_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1_f64, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1_f64, f64::MIN, 2.2].try_min(), Ok(f64::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1_f64, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!([1.1_f64, f64::INFINITY, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// Uses `total_cmp` to always produce an ordering in accordance to the
    /// totalOrder predicate of IEEE 754 (2008 revision).
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// # use nflux_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1_f64, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1_f64, f64::MAX, 2.2].try_max(), Ok(f64::MAX));
    ///
    /// // Error cases
    /// assert_eq!([1.1_f64, f64::NAN, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Find index bin containing 'value', where bins are low < value <= high
    ///
    /// A value on a bin edge returns the bin below. Values equal to the lowest
    /// bound are considered part of the first bin.
    ///
    /// View of some energy groups:
    /// ```text
    ///     0.0 <= bin 0 <= 0.1
    ///     0.1 <  bin 1 <= 1.0
    ///     1.0 <  bin 2 <= 20.0
    /// ```
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// let bounds: Vec<f64> = vec![0.0, 0.1, 1.0, 20.0];
    ///
    /// // Find values in the array
    /// assert_eq!(bounds.find_bin_inclusive(0.0 ), Ok(0));
    /// assert_eq!(bounds.find_bin_inclusive(0.5 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(1.0 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(20.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(bounds.find_bin_inclusive(-1.0).is_err());
    /// assert!(bounds.find_bin_inclusive(21.0).is_err());
    /// ```
    fn find_bin_inclusive(&self, value: T) -> Result<usize>;

    /// Check that values are finite and strictly increasing
    ///
    /// Group structures are only meaningful as a sequence of unique, ascending
    /// boundaries. The first offending pair is reported by index of the lower
    /// value.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// # use nflux_utils::Error;
    /// assert_eq!([1.0_f64, 2.0, 3.0].check_increasing(), Ok(()));
    ///
    /// // duplicates and decreasing pairs are both rejected
    /// assert_eq!(
    ///     [1.0_f64, 2.0, 2.0].check_increasing(),
    ///     Err(Error::NotStrictlyIncreasing { index: 1, lower: 2.0, upper: 2.0 })
    /// );
    /// assert!([3.0_f64, 1.0].check_increasing().is_err());
    ///
    /// // anything undefined is never considered ordered
    /// assert!([1.0_f64, f64::NAN].check_increasing().is_err());
    /// ```
    fn check_increasing(&self) -> Result<()>;
}

impl SliceExt<f64> for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .min_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .max_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn find_bin_inclusive(&self, value: f64) -> Result<usize> {
        // make sure there are bin edges to check against
        let n = self.len();
        if n < 2 {
            return Err(Error::BelowMinimumSliceLength {
                length: n,
                minimum_required: 2,
            });
        }

        let lower_bound = self[0];
        let upper_bound = self[n - 1];

        // is the value relevant?
        if value < lower_bound || value > upper_bound {
            return Err(Error::ValueOutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // special case for being on the lowest edge
        if value == lower_bound {
            return Ok(0);
        }

        // first upper edge at or above the value, ascending order assumed
        self[1..]
            .iter()
            .position(|high| value <= *high)
            .ok_or(Error::UncapturedErrorCondition)
    }

    fn check_increasing(&self) -> Result<()> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        }

        match self.windows(2).position(|pair| pair[0] >= pair[1]) {
            Some(index) => Err(Error::NotStrictlyIncreasing {
                index,
                lower: self[index],
                upper: self[index + 1],
            }),
            None => Ok(()),
        }
    }
}
