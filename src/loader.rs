//! CSV reader for air-quality data files.
//!
//! Expects a header row containing `Approximate Zip Code`,
//! `Reading Time String` and `Concentration`. Other columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::dataset::Reading;

/// Reads every row of `path` into a [`Reading`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is malformed.
pub fn load_readings(path: impl AsRef<Path>) -> Result<Vec<Reading>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let readings =
        read_readings(file).with_context(|| format!("cannot read {}", path.display()))?;

    info!(path = %path.display(), rows = readings.len(), "Data file loaded");
    Ok(readings)
}

/// Parses comma-delimited readings from any reader.
///
/// The whole read fails on the first bad row; row numbers in errors count data
/// rows from 1, not including the header.
pub fn read_readings<R: Read>(reader: R) -> Result<Vec<Reading>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut readings = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let row = index + 1;
        let reading: Reading = result.with_context(|| format!("malformed row {row}"))?;

        if !reading.concentration.is_finite() || reading.concentration < 0.0 {
            bail!(
                "row {row}: concentration {} is not a non-negative number",
                reading.concentration
            );
        }

        readings.push(reading);
    }

    debug!(rows = readings.len(), "Parsed readings");
    Ok(readings)
}
