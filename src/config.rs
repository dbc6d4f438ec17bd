//! Run configuration.
//!
//! `Config::default()` reproduces the fixed constants of the original tool:
//! compare 2016 against 2021, read `./popu-pref.csv`, smallest ratio first.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::PopError;

pub const DEFAULT_BASE_YEAR: u32 = 2016;
pub const DEFAULT_COMPARE_YEAR: u32 = 2021;
pub const DEFAULT_INPUT: &str = "./popu-pref.csv";

/// Order of the ranking by growth ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    /// Smallest ratio (largest decline) first.
    #[default]
    Asc,
    /// Largest ratio first.
    Desc,
}

/// How the first line of the input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeaderMode {
    /// Drop line 1 only if its year field is not an integer.
    #[default]
    Auto,
    /// Always drop line 1.
    Present,
    /// Never drop line 1.
    Absent,
}

/// What to do with a row whose numeric fields do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InvalidRowPolicy {
    /// Log a warning and continue.
    #[default]
    Skip,
    /// Abort the run.
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Input file; `-` reads stdin.
    pub input: PathBuf,
    pub base_year: u32,
    pub compare_year: u32,
    pub direction: SortDirection,
    /// Decimal places for the ratio; `None` prints the shortest exact form.
    pub precision: Option<usize>,
    pub header: HeaderMode,
    pub on_invalid: InvalidRowPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            base_year: DEFAULT_BASE_YEAR,
            compare_year: DEFAULT_COMPARE_YEAR,
            direction: SortDirection::default(),
            precision: None,
            header: HeaderMode::default(),
            on_invalid: InvalidRowPolicy::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), PopError> {
        if self.base_year == self.compare_year {
            return Err(PopError::Config(format!(
                "base year and comparison year are both {}",
                self.base_year
            )));
        }
        Ok(())
    }

    /// True if rows for `year` take part in the comparison.
    pub fn is_target_year(&self, year: u32) -> bool {
        year == self.base_year || year == self.compare_year
    }

    /// True if the input should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
