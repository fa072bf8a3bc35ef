//! Text rendering of the zip code by time-of-day cross table.
//!
//! Layout: a label row of five blanks followed by each time label right
//! aligned in ten columns, then one row per active zip code. Cells hold the
//! selected statistic with two decimals, or `N/A` when the pair has no data.

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::stats::Statistic;

/// Shown instead of a table when nothing has been loaded.
pub const NO_DATASET_NOTICE: &str = "Please load a dataset first";

const ZIP_WIDTH: usize = 5;
const CELL_WIDTH: usize = 10;
const MISSING: &str = "N/A";

/// Renders the table, or [`NO_DATASET_NOTICE`] if the dataset was never loaded.
pub fn render(dataset: &Dataset, stat: Statistic) -> String {
    match render_table(dataset, stat) {
        Ok(table) => table,
        Err(e) => {
            debug!(error = %e, "Table not rendered");
            format!("{NO_DATASET_NOTICE}\n")
        }
    }
}

/// Renders the cross table for `stat` over the active zip codes.
///
/// # Errors
///
/// Returns [`DatasetError::EmptyDataset`] if the dataset was never loaded.
pub fn render_table(dataset: &Dataset, stat: Statistic) -> Result<String, DatasetError> {
    if !dataset.is_loaded() {
        return Err(DatasetError::EmptyDataset);
    }

    let times = dataset.time_labels();
    let mut table = " ".repeat(ZIP_WIDTH);
    for time in times {
        table.push_str(&format!("{time:>CELL_WIDTH$}"));
    }
    table.push('\n');

    let mut rows = 0usize;
    for zip in dataset.active_zips() {
        table.push_str(&format!("{zip:<ZIP_WIDTH$.ZIP_WIDTH$}"));
        for time in times {
            let cell = match dataset.statistics_for(zip, time) {
                Ok(summary) => format!("{:>CELL_WIDTH$.2}", stat.select(&summary)),
                Err(DatasetError::NoMatchingItems { .. }) => format!("{MISSING:>CELL_WIDTH$}"),
                Err(e) => return Err(e),
            };
            table.push_str(&cell);
        }
        table.push('\n');
        rows += 1;
    }

    debug!(%stat, rows, columns = times.len(), "Rendered cross table");
    Ok(table)
}
