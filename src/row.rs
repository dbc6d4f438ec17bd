//! Input row layout: `year,region,<unused>,population[,...]`.

use crate::error::RowError;

pub const YEAR_FIELD: usize = 0;
pub const REGION_FIELD: usize = 1;
pub const POPULATION_FIELD: usize = 3;

/// The three fields of an input line that take part in the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    pub year: u32,
    /// Region name, verbatim.
    pub region: &'a str,
    pub population: u64,
}

impl<'a> Row<'a> {
    /// Parse the year, and the rest of the row only if `wanted(year)` holds.
    ///
    /// Rows from other years return `Ok(None)` without their population
    /// being looked at.
    pub fn parse_for_years(
        line: &'a str,
        wanted: impl Fn(u32) -> bool,
    ) -> Result<Option<Self>, RowError> {
        let fields: Vec<&str> = line.split(',').collect();
        let year = parse_number(field(&fields, YEAR_FIELD)?, "year")?;
        if !wanted(year) {
            return Ok(None);
        }
        Self::with_year(&fields, year).map(Some)
    }

    fn with_year(fields: &[&'a str], year: u32) -> Result<Self, RowError> {
        let region = field(fields, REGION_FIELD)?;
        let population = parse_number(field(fields, POPULATION_FIELD)?, "population")?;
        Ok(Row {
            year,
            region,
            population,
        })
    }
}

fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, RowError> {
    fields
        .get(index)
        .copied()
        .ok_or(RowError::MissingField { index })
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &'static str) -> Result<T, RowError> {
    raw.trim().parse().map_err(|_| RowError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    })
}
