//! Interactive text menu driving a [`Dataset`].
//!
//! The session is generic over its input and output so it can run against
//! stdin/stdout or in-memory buffers.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::loader::load_readings;
use crate::report::{NO_DATASET_NOTICE, render};
use crate::stats::Statistic;

/// A main menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Show(Statistic),
    AdjustFilters,
    Load,
    Quit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::Show(Statistic::Avg)),
            2 => Some(MenuChoice::Show(Statistic::Min)),
            3 => Some(MenuChoice::Show(Statistic::Max)),
            4 => Some(MenuChoice::AdjustFilters),
            5 => Some(MenuChoice::Load),
            9 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

pub struct Session<R, W> {
    dataset: Dataset,
    data_file: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(dataset: Dataset, data_file: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            dataset,
            data_file: data_file.into(),
            input,
            output,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Consumes the session, returning the dataset and the output sink.
    pub fn into_parts(self) -> (Dataset, W) {
        (self.dataset, self.output)
    }

    /// Greets the user, settles the header, then runs the main menu until quit or end of input.
    pub fn run(&mut self, preset_header: Option<String>) -> Result<()> {
        let Some(name) = self.prompt("Please enter your name: ")? else {
            return Ok(());
        };
        writeln!(self.output, "Hi {name}, Hope you have a wonderful day!")?;

        if !self.settle_header(preset_header)? {
            return Ok(());
        }
        writeln!(self.output)?;

        self.main_menu()
    }

    /// Returns `false` if input ended before a valid header was entered.
    fn settle_header(&mut self, preset: Option<String>) -> Result<bool> {
        if let Some(header) = preset {
            match self.dataset.set_header(header) {
                Ok(()) => return Ok(true),
                Err(e) => warn!(error = %e, "Configured header rejected"),
            }
        }

        loop {
            let Some(header) = self.prompt("Enter a header for the menu: ")? else {
                return Ok(false);
            };
            match self.dataset.set_header(header) {
                Ok(()) => return Ok(true),
                Err(DatasetError::Validation { .. }) => writeln!(
                    self.output,
                    "Header must be a string less or equal to than thirty characters long"
                )?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", self.dataset.header())?;
            self.print_menu()?;

            let Some(answer) = self.prompt("What is your choice? ")? else {
                break;
            };
            let Ok(number) = answer.trim().parse::<i64>() else {
                writeln!(self.output, "Please enter a number only.")?;
                continue;
            };

            match MenuChoice::from_number(number) {
                Some(MenuChoice::Show(stat)) => {
                    write!(self.output, "{}", render(&self.dataset, stat))?;
                }
                Some(MenuChoice::AdjustFilters) => self.manage_filters()?,
                Some(MenuChoice::Load) => self.load()?,
                Some(MenuChoice::Quit) => break,
                None => writeln!(self.output, "That's not a valid selection.")?,
            }
        }

        writeln!(self.output, "Goodbye! Thank you for using the database.")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Main Menu")?;
        for (number, stat) in [(1, Statistic::Avg), (2, Statistic::Min), (3, Statistic::Max)] {
            writeln!(
                self.output,
                "{number} - Print {stat} Particulate Concentration by Zip Code and Time"
            )?;
        }
        writeln!(self.output, "4 - Adjust Zip Code Filters")?;
        writeln!(self.output, "5 - Load Data")?;
        writeln!(self.output, "9 - Quit")?;
        Ok(())
    }

    /// A failed load is reported to the user and leaves the current data in place.
    fn load(&mut self) -> Result<()> {
        match load_readings(&self.data_file) {
            Ok(readings) => {
                let count = readings.len();
                self.dataset.load(readings);
                writeln!(self.output, "{count} lines loaded")?;
            }
            Err(e) => {
                warn!(error = %e, path = %self.data_file.display(), "Load failed");
                writeln!(self.output, "Could not load data: {e:#}")?;
            }
        }
        Ok(())
    }

    fn manage_filters(&mut self) -> Result<()> {
        if self.dataset.get_zip_states().is_empty() {
            writeln!(self.output, "{NO_DATASET_NOTICE}")?;
            return Ok(());
        }

        writeln!(self.output, "The following labels are in the dataset:")?;
        loop {
            let zips = self.dataset.get_zip_states();
            for (index, (zip, active)) in zips.iter().enumerate() {
                let mode = if *active { "ACTIVE" } else { "INACTIVE" };
                writeln!(self.output, "{}: {zip}{mode:>10}", index + 1)?;
            }

            let Some(answer) = self.prompt(
                "Please select an item to toggle or press enter return when you are finished ",
            )?
            else {
                return Ok(());
            };
            if answer.trim().is_empty() {
                return Ok(());
            }

            let Ok(selected) = answer.trim().parse::<usize>() else {
                writeln!(self.output, "Please enter a number or enter/return to exit")?;
                continue;
            };
            let Some((zip, _)) = selected.checked_sub(1).and_then(|i| zips.get(i)) else {
                writeln!(self.output, "Please enter a number from the list")?;
                continue;
            };

            self.dataset.toggle_zip(zip)?;
            info!(zip_code = %zip, "Filter toggled from menu");
        }
    }

    /// Writes `message` and reads one line without its terminator. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
