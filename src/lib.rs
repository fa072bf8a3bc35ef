pub mod dataset;
pub mod error;
pub mod loader;
pub mod menu;
pub mod report;
pub mod stats;
