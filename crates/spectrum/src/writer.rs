//! Write operations for Spectrum data

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::spectrum::Spectrum;
use nflux_utils::ValueExt;

/// Write a [Spectrum] to a plain text table
///
/// One line per group with the lower edge, upper edge, and value in
/// scientific notation, preceded by a short commented header.
///
/// ```text
/// # groups: 2, units: per unit energy, normalised: false
/// #  e_low (eV)     e_high (eV)    value
/// 1.000000e+00   2.000000e+00   3.000000e+00
/// 2.000000e+00   4.000000e+00   5.000000e-01
/// ```
///
/// ```rust, no_run
/// # use nflux_spectrum::{write_ascii, Spectrum};
/// let spectrum = Spectrum::new(vec![1.0, 2.0, 4.0], vec![3.0, 0.5], false, true).unwrap();
/// write_ascii(&spectrum, "./spectrum.txt").unwrap();
/// ```
pub fn write_ascii<P: AsRef<Path>>(spectrum: &Spectrum, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(
        writer,
        "# groups: {}, units: {}, normalised: {}",
        spectrum.groups(),
        if spectrum.dfde {
            "per unit energy"
        } else {
            "per group"
        },
        spectrum.is_density
    )?;
    writeln!(writer, "#  e_low (eV)     e_high (eV)    value")?;

    for (i, value) in spectrum.values.iter().enumerate() {
        writeln!(
            writer,
            "{}   {}   {}",
            spectrum.edges[i].sci(6, 2),
            spectrum.edges[i + 1].sci(6, 2),
            value.sci(6, 2)
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a [Spectrum] to a JSON file
///
/// This is a direct serialisation of the edges, values, and flags, and may
/// be read back with [read_json()](crate::read_json).
///
/// ```rust, no_run
/// # use nflux_spectrum::{write_json, Spectrum};
/// let spectrum = Spectrum::new(vec![1.0, 2.0, 4.0], vec![3.0, 0.5], false, true).unwrap();
/// write_json(&spectrum, "./spectrum.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(spectrum: &Spectrum, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    serde_json::to_writer_pretty(&mut writer, spectrum)?;
    writer.flush()?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
