//! Cross-table statistics: the per-cell summary and the statistic selector.

use std::fmt;

use clap::ValueEnum;

/// Minimum, average and maximum concentration of one zip code / time-of-day cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Summary {
    /// Reduces a set of concentrations. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Summary {
            min,
            avg: mean(values),
            max,
        })
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Which element of a [`Summary`] a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Statistic {
    Min,
    Avg,
    Max,
}

impl Statistic {
    pub fn select(self, summary: &Summary) -> f64 {
        match self {
            Statistic::Min => summary.min,
            Statistic::Avg => summary.avg,
            Statistic::Max => summary.max,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Statistic::Min => "Minimum",
            Statistic::Avg => "Average",
            Statistic::Max => "Maximum",
        };
        f.write_str(name)
    }
}
