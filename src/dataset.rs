//! In-memory air-quality dataset.
//!
//! Holds the loaded readings together with the labels derived from them: the
//! zip codes (each with an active/inactive display flag) and the distinct
//! time-of-day labels. Cross-table statistics are computed on demand.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::error::DatasetError;
use crate::stats::Summary;

/// Longest header the menu will display.
pub const MAX_HEADER_LENGTH: usize = 30;

/// One particulate measurement, as read from a data file row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    #[serde(rename = "Approximate Zip Code")]
    pub zip_code: String,
    #[serde(rename = "Reading Time String")]
    pub time_label: String,
    #[serde(rename = "Concentration")]
    pub concentration: f64,
}

impl Reading {
    pub fn new(
        zip_code: impl Into<String>,
        time_label: impl Into<String>,
        concentration: f64,
    ) -> Self {
        Self {
            zip_code: zip_code.into(),
            time_label: time_label.into(),
            concentration,
        }
    }
}

/// Built-in demonstration readings.
pub fn sample_readings() -> Vec<Reading> {
    vec![
        Reading::new("12345", "Morning", 1.1),
        Reading::new("94022", "Morning", 2.2),
        Reading::new("94040", "Morning", 3.0),
        Reading::new("94022", "Midday", 1.0),
        Reading::new("94040", "Morning", 1.0),
        Reading::new("94022", "Evening", 3.2),
    ]
}

/// Readings plus the labels and display filter derived from them.
///
/// Starts unloaded; [`Dataset::load`] replaces everything but the header.
#[derive(Debug, Default)]
pub struct Dataset {
    readings: Option<Vec<Reading>>,
    header: String,
    zip_states: Vec<(String, bool)>,
    time_labels: Vec<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: impl Into<String>) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        dataset.set_header(header)?;
        Ok(dataset)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Replaces the header if it is at most [`MAX_HEADER_LENGTH`] characters.
    pub fn set_header(&mut self, header: impl Into<String>) -> Result<(), DatasetError> {
        let header = header.into();
        let len = header.chars().count();
        if len > MAX_HEADER_LENGTH {
            return Err(DatasetError::Validation {
                len,
                max: MAX_HEADER_LENGTH,
            });
        }
        self.header = header;
        Ok(())
    }

    /// Replaces all readings and rebuilds the zip and time labels.
    ///
    /// Every zip code starts out active; toggles from a previous load are lost.
    pub fn load(&mut self, readings: Vec<Reading>) {
        let mut zip_states = Vec::new();
        let mut time_labels = Vec::new();
        {
            let mut seen_zips = HashSet::new();
            let mut seen_times = HashSet::new();
            for reading in &readings {
                if seen_zips.insert(reading.zip_code.as_str()) {
                    zip_states.push((reading.zip_code.clone(), true));
                }
                if seen_times.insert(reading.time_label.as_str()) {
                    time_labels.push(reading.time_label.clone());
                }
            }
        }

        debug!(
            readings = readings.len(),
            zip_codes = zip_states.len(),
            time_labels = time_labels.len(),
            "Dataset loaded"
        );

        self.zip_states = zip_states;
        self.time_labels = time_labels;
        self.readings = Some(readings);
    }

    /// `true` once [`Dataset::load`] has been called, even with zero readings.
    pub fn is_loaded(&self) -> bool {
        self.readings.is_some()
    }

    pub fn readings(&self) -> &[Reading] {
        self.readings.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.readings().len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings().is_empty()
    }

    /// Distinct time-of-day labels in first-seen order.
    pub fn time_labels(&self) -> &[String] {
        &self.time_labels
    }

    /// Copy of the zip code flags, in first-seen order.
    pub fn get_zip_states(&self) -> Vec<(String, bool)> {
        self.zip_states.clone()
    }

    pub fn toggle_zip(&mut self, zip_code: &str) -> Result<(), DatasetError> {
        let active = self.zip_flag(zip_code)?;
        *active = !*active;
        debug!(zip_code, active = *active, "Zip code toggled");
        Ok(())
    }

    /// Sets the flag outright, so repeating the call has no further effect.
    pub fn set_zip_active(&mut self, zip_code: &str, active: bool) -> Result<(), DatasetError> {
        *self.zip_flag(zip_code)? = active;
        debug!(zip_code, active, "Zip code flag set");
        Ok(())
    }

    fn zip_flag(&mut self, zip_code: &str) -> Result<&mut bool, DatasetError> {
        self.zip_states
            .iter_mut()
            .find(|(zip, _)| zip == zip_code)
            .map(|(_, active)| active)
            .ok_or_else(|| DatasetError::NotFound(zip_code.to_string()))
    }

    /// Zip codes currently shown in reports, in first-seen order.
    pub fn active_zips(&self) -> impl Iterator<Item = &str> {
        self.zip_states
            .iter()
            .filter(|(_, active)| *active)
            .map(|(zip, _)| zip.as_str())
    }

    /// Min, average and max concentration for an exact zip code / time label pair.
    ///
    /// # Errors
    ///
    /// [`DatasetError::EmptyDataset`] if nothing was loaded yet and
    /// [`DatasetError::NoMatchingItems`] if no reading matches both labels.
    pub fn statistics_for(
        &self,
        zip_code: &str,
        time_label: &str,
    ) -> Result<Summary, DatasetError> {
        let readings = self.readings.as_ref().ok_or(DatasetError::EmptyDataset)?;

        let concentrations: Vec<f64> = readings
            .iter()
            .filter(|r| r.zip_code == zip_code && r.time_label == time_label)
            .map(|r| r.concentration)
            .collect();

        Summary::from_values(&concentrations).ok_or_else(|| DatasetError::NoMatchingItems {
            zip_code: zip_code.to_string(),
            time_label: time_label.to_string(),
        })
    }
}
