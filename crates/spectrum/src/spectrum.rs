// crate modules
use crate::error::{Error, Result};

// nflux modules
use nflux_utils::{f, SliceExt, ValueExt};

// external crates
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

/// Discrete multigroup spectrum
///
/// Group boundaries are stored as `edges`, with exactly one entry in `values`
/// for every group between consecutive edges.
///
/// ```text
/// edges : e0     e1     e2     e3
/// values:    v0     v1     v2
/// ```
///
/// Two flags describe what the values represent:
///
/// - `dfde` - values are per unit energy (a group-averaged flux density),
///   otherwise the values are already integrated over each group
/// - `is_density` - values have been normalised to a unit total
///
/// For example, a group-averaged flux from a continuous model:
///
/// ```rust
/// # use nflux_spectrum::Spectrum;
/// let spectrum = Spectrum::new(
///     vec![1.0, 2.0, 4.0],
///     vec![3.0, 0.5],
///     false,
///     true,
/// ).unwrap();
///
/// assert_eq!(spectrum.groups(), 2);
/// assert_eq!(spectrum.group_totals(), vec![3.0, 1.0]);
/// assert_eq!(spectrum.total(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Group boundaries (eV), strictly increasing
    pub edges: Vec<f64>,
    /// One value per group
    pub values: Vec<f64>,
    /// Values are normalised to a unit total
    pub is_density: bool,
    /// Values are per unit energy
    pub dfde: bool,
}

impl Spectrum {
    /// Create a new spectrum from group edges and values
    ///
    /// Fails if there are fewer than two edges, the edges are not strictly
    /// increasing, or there is not exactly one value per group.
    pub fn new(edges: Vec<f64>, values: Vec<f64>, is_density: bool, dfde: bool) -> Result<Self> {
        check_edges(&edges)?;

        if values.len() != edges.len() - 1 {
            return Err(Error::MismatchedLength {
                expected: edges.len() - 1,
                found: values.len(),
            });
        }

        Ok(Self {
            edges,
            values,
            is_density,
            dfde,
        })
    }

    /// Number of energy groups
    pub fn groups(&self) -> usize {
        self.values.len()
    }

    /// Width of every group
    pub fn widths(&self) -> Vec<f64> {
        self.edges
            .iter()
            .tuple_windows()
            .map(|(lo, hi)| hi - lo)
            .collect()
    }

    /// Arithmetic centre of every group
    pub fn midpoints(&self) -> Vec<f64> {
        self.edges
            .iter()
            .tuple_windows()
            .map(|(lo, hi)| 0.5 * (lo + hi))
            .collect()
    }

    /// X coordinates for drawing the spectrum as a histogram
    ///
    /// Every interior edge is repeated so that each group is drawn as a flat
    /// step, pairing up with [Spectrum::step_y()].
    ///
    /// ```rust
    /// # use nflux_spectrum::Spectrum;
    /// let spectrum = Spectrum::new(vec![1.0, 2.0, 4.0], vec![3.0, 0.5], false, true).unwrap();
    /// assert_eq!(spectrum.step_x(), vec![1.0, 2.0, 2.0, 4.0]);
    /// assert_eq!(spectrum.step_y(), vec![3.0, 3.0, 0.5, 0.5]);
    /// ```
    pub fn step_x(&self) -> Vec<f64> {
        self.edges
            .iter()
            .tuple_windows()
            .flat_map(|(lo, hi)| [*lo, *hi])
            .collect()
    }

    /// Y coordinates for drawing the spectrum as a histogram
    pub fn step_y(&self) -> Vec<f64> {
        self.values.iter().flat_map(|v| [*v, *v]).collect()
    }

    /// Value integrated over every group
    ///
    /// Per unit energy values are multiplied by the group width, anything else
    /// is already a group total.
    pub fn group_totals(&self) -> Vec<f64> {
        if self.dfde {
            self.values
                .iter()
                .zip(self.widths())
                .map(|(v, w)| v * w)
                .collect()
        } else {
            self.values.clone()
        }
    }

    /// Sum over all groups
    pub fn total(&self) -> f64 {
        self.group_totals().iter().sum()
    }

    /// Value of the group containing `energy`
    ///
    /// Energies on an edge belong to the group below, with the lowest edge
    /// included in the first group.
    ///
    /// ```rust
    /// # use nflux_spectrum::Spectrum;
    /// let spectrum = Spectrum::new(vec![1.0, 2.0, 4.0], vec![3.0, 0.5], false, true).unwrap();
    /// assert_eq!(spectrum.value_at(1.5).unwrap(), 3.0);
    /// assert_eq!(spectrum.value_at(2.0).unwrap(), 3.0);
    /// assert_eq!(spectrum.value_at(2.1).unwrap(), 0.5);
    /// assert!(spectrum.value_at(5.0).is_err());
    /// ```
    pub fn value_at(&self, energy: f64) -> Result<f64> {
        let index = self.edges.find_bin_inclusive(energy)?;
        Ok(self.values[index])
    }

    /// Multiply every value by a constant factor
    ///
    /// A scaled spectrum is no longer normalised, so `is_density` is cleared
    /// for anything other than a factor of one.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            edges: self.edges.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
            is_density: self.is_density && factor == 1.0,
            dfde: self.dfde,
        }
    }

    /// Normalise to a unit total
    ///
    /// The result keeps the same units convention (`dfde`) but sums to one
    /// over all groups, and is flagged as a density.
    ///
    /// ```rust
    /// # use nflux_spectrum::Spectrum;
    /// let spectrum = Spectrum::new(vec![1.0, 2.0, 4.0], vec![3.0, 0.5], false, true).unwrap();
    /// let density = spectrum.normalised().unwrap();
    ///
    /// assert!(density.is_density);
    /// assert_eq!(density.group_totals(), vec![0.75, 0.25]);
    /// ```
    pub fn normalised(&self) -> Result<Self> {
        let total = self.total();
        if !total.is_finite() || total == 0.0 {
            return Err(Error::UndefinedTotal(total));
        }

        let mut spectrum = self.scaled(1.0 / total);
        spectrum.is_density = true;
        Ok(spectrum)
    }

    /// Redistribute onto a new group structure
    ///
    /// Each original group is assumed to be flat in energy, so a new group
    /// receives the fraction of every original group total that it overlaps.
    /// Totals are therefore conserved wherever the two structures overlap,
    /// and any part of a new group outside the original edges receives
    /// nothing.
    ///
    /// ```rust
    /// # use nflux_spectrum::Spectrum;
    /// let spectrum = Spectrum::new(vec![0.0, 2.0, 4.0], vec![1.0, 3.0], false, true).unwrap();
    ///
    /// // collapse into one group
    /// let coarse = spectrum.rebin(&[0.0, 4.0]).unwrap();
    /// assert_eq!(coarse.values, vec![2.0]);
    ///
    /// // split the groups in half
    /// let fine = spectrum.rebin(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(fine.values, vec![1.0, 1.0, 3.0, 3.0]);
    /// ```
    pub fn rebin(&self, edges: &[f64]) -> Result<Self> {
        check_edges(edges)?;

        let lowest = self.edges[0];
        let highest = self.edges[self.edges.len() - 1];
        if edges[0] < lowest || edges[edges.len() - 1] > highest {
            warn!(
                "New groups extend beyond {} - {} eV, only the overlap is kept",
                lowest.sci(3, 2),
                highest.sci(3, 2)
            );
        }

        let old: Vec<(f64, f64, f64)> = self
            .edges
            .iter()
            .tuple_windows()
            .zip(self.group_totals())
            .map(|((lo, hi), total)| (*lo, *hi, total))
            .collect();

        let values = edges
            .iter()
            .tuple_windows()
            .map(|(lo, hi)| {
                let collected: f64 = old
                    .iter()
                    .filter(|(old_lo, old_hi, _)| old_lo < hi && old_hi > lo)
                    .map(|(old_lo, old_hi, total)| {
                        let overlap = hi.min(*old_hi) - lo.max(*old_lo);
                        total * overlap / (old_hi - old_lo)
                    })
                    .sum();

                if self.dfde {
                    collected / (hi - lo)
                } else {
                    collected
                }
            })
            .collect();

        Ok(Self {
            edges: edges.to_vec(),
            values,
            is_density: self.is_density,
            dfde: self.dfde,
        })
    }
}

impl std::fmt::Display for Spectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Spectrum {\n".to_string();
        s += &f!("    groups: {}\n", self.groups());
        s += &f!(
            "    energy: {} - {} eV\n",
            self.edges[0].sci(5, 2),
            self.edges[self.edges.len() - 1].sci(5, 2)
        );
        s += &f!("    total: {}\n", self.total().sci(5, 2));
        s += &f!(
            "    units: {}\n",
            if self.dfde { "per unit energy" } else { "per group" }
        );
        s += &f!("    normalised: {}\n}}", self.is_density);

        write!(f, "{}", s)
    }
}

/// Common checks on a set of group boundaries
fn check_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::BelowMinimumEdges(edges.len()));
    }
    edges.check_increasing()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example() -> Spectrum {
        Spectrum::new(vec![1.0, 2.0, 4.0, 8.0], vec![4.0, 2.0, 1.0], false, true).unwrap()
    }

    #[test]
    fn rejects_bad_structures() {
        assert!(matches!(
            Spectrum::new(vec![1.0], vec![], false, true),
            Err(Error::BelowMinimumEdges(1))
        ));
        assert!(matches!(
            Spectrum::new(vec![1.0, 2.0], vec![1.0, 2.0], false, true),
            Err(Error::MismatchedLength {
                expected: 1,
                found: 2
            })
        ));
        assert!(matches!(
            Spectrum::new(vec![2.0, 1.0], vec![1.0], false, true),
            Err(Error::Utils(_))
        ));
    }

    #[test]
    fn widths_and_midpoints() {
        let spectrum = example();
        assert_eq!(spectrum.widths(), vec![1.0, 2.0, 4.0]);
        assert_eq!(spectrum.midpoints(), vec![1.5, 3.0, 6.0]);
    }

    #[test]
    fn totals_respect_units() {
        let mut spectrum = example();
        assert_eq!(spectrum.total(), 12.0);

        spectrum.dfde = false;
        assert_eq!(spectrum.total(), 7.0);
    }

    #[test]
    fn scaling_clears_density_flag() {
        let density = example().normalised().unwrap();
        assert_relative_eq!(density.total(), 1.0);
        assert!(!density.scaled(2.0).is_density);
        assert!(density.scaled(1.0).is_density);
    }

    #[test]
    fn zero_total_can_not_be_normalised() {
        let spectrum = Spectrum::new(vec![1.0, 2.0], vec![0.0], false, true).unwrap();
        assert!(matches!(spectrum.normalised(), Err(Error::UndefinedTotal(_))));
    }

    #[test]
    fn rebin_outside_range_is_partial() {
        let spectrum = example();
        let rebinned = spectrum.rebin(&[0.0, 2.0, 16.0]).unwrap();

        // [0, 2] only overlaps the first group over [1, 2]
        assert_relative_eq!(rebinned.values[0], 4.0 / 2.0);
        // [2, 16] collects the remaining groups
        assert_relative_eq!(rebinned.values[1], (4.0 + 4.0) / 14.0);
    }

    #[test]
    fn display_summary() {
        let text = example().to_string();
        assert!(text.contains("groups: 3"));
        assert!(text.contains("energy: 1.00000e+00 - 8.00000e+00 eV"));
        assert!(text.contains("units: per unit energy"));
    }
}
