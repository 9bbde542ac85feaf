//! Read operations for Spectrum data

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::spectrum::Spectrum;

/// Read a [Spectrum] previously written with [write_json()](crate::write_json)
///
/// The group structure is checked on the way in, so anything edited by hand
/// must still have strictly increasing edges and one value per group.
///
/// ```rust, no_run
/// # use nflux_spectrum::read_json;
/// let spectrum = read_json("path/to/spectrum.json").unwrap();
/// ```
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Spectrum> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let raw: Spectrum = serde_json::from_reader(reader)?;
    Spectrum::new(raw.edges, raw.values, raw.is_density, raw.dfde)
}
