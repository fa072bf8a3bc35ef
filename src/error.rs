//! Errors raised by the in-memory dataset.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// Header text is longer than the menu allows. The stored header is untouched.
    #[error("header is {len} characters long, at most {max} are allowed")]
    Validation { len: usize, max: usize },

    /// Statistics were requested before any data was loaded.
    #[error("no dataset has been loaded")]
    EmptyDataset,

    /// No reading exists for this zip code and time of day.
    #[error("no readings for zip code {zip_code} at {time_label}")]
    NoMatchingItems {
        zip_code: String,
        time_label: String,
    },

    #[error("zip code {0} is not in the dataset")]
    NotFound(String),
}
