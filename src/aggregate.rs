//! Aggregation of input lines into a per-region table.
//!
//! `RegionTable::fold` is the step function of the accumulation phase: it
//! takes the table by value plus one line and returns the updated table.
//! The pipeline drives it with `Iterator::try_fold`.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::{Config, HeaderMode, InvalidRowPolicy};
use crate::error::PopError;
use crate::row::{Row, YEAR_FIELD};
use crate::source::Line;

/// Populations of one region in the two compared years.
///
/// A year with no row for the region stays at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrowthRecord {
    pub before: u64,
    pub after: u64,
}

/// Counters describing what the fold did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoldStats {
    /// Lines seen, including blank, header and skipped lines.
    pub lines: usize,
    /// Rows from the base or comparison year.
    pub matched: usize,
    /// Blank lines and rows from other years.
    pub ignored: usize,
    /// Malformed rows dropped under `InvalidRowPolicy::Skip`.
    pub skipped: usize,
    pub header_dropped: bool,
}

/// Region name to growth record, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionTable {
    regions: Vec<(String, GrowthRecord)>,
    index: HashMap<String, usize>,
    stats: FoldStats,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input line into the table.
    ///
    /// Only fails for a malformed row under `InvalidRowPolicy::Fail`.
    pub fn fold(mut self, line: &Line, config: &Config) -> Result<Self, PopError> {
        self.stats.lines += 1;

        if line.text.trim().is_empty() {
            self.stats.ignored += 1;
            return Ok(self);
        }

        if line.number == 1 && is_header(&line.text, config.header) {
            debug!(line = %line.text, "dropping header line");
            self.stats.header_dropped = true;
            return Ok(self);
        }

        match Row::parse_for_years(&line.text, |year| config.is_target_year(year)) {
            Ok(Some(row)) => {
                self.stats.matched += 1;
                self.apply(row, config);
            }
            Ok(None) => self.stats.ignored += 1,
            Err(source) => match config.on_invalid {
                InvalidRowPolicy::Skip => {
                    warn!(line = line.number, "skipping row: {source}");
                    self.stats.skipped += 1;
                }
                InvalidRowPolicy::Fail => {
                    return Err(PopError::Parse {
                        line: line.number,
                        source,
                    });
                }
            },
        }
        Ok(self)
    }

    /// Overwrite the region's value for the row's year.
    fn apply(&mut self, row: Row<'_>, config: &Config) {
        let record = self.entry(row.region);
        let slot = if row.year == config.base_year {
            &mut record.before
        } else {
            &mut record.after
        };
        if *slot != 0 {
            debug!(
                region = row.region,
                year = row.year,
                old = *slot,
                new = row.population,
                "duplicate row, later value wins"
            );
        }
        *slot = row.population;
    }

    fn entry(&mut self, region: &str) -> &mut GrowthRecord {
        let i = match self.index.get(region) {
            Some(&i) => i,
            None => {
                self.regions
                    .push((region.to_string(), GrowthRecord::default()));
                self.index.insert(region.to_string(), self.regions.len() - 1);
                self.regions.len() - 1
            }
        };
        &mut self.regions[i].1
    }

    pub fn get(&self, region: &str) -> Option<&GrowthRecord> {
        self.index.get(region).map(|&i| &self.regions[i].1)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GrowthRecord)> {
        self.regions.iter().map(|(name, rec)| (name.as_str(), rec))
    }

    pub fn stats(&self) -> FoldStats {
        self.stats
    }

    /// Give up the table, ending the accumulation phase.
    pub fn into_parts(self) -> (Vec<(String, GrowthRecord)>, FoldStats) {
        (self.regions, self.stats)
    }
}

fn is_header(text: &str, mode: HeaderMode) -> bool {
    match mode {
        HeaderMode::Present => true,
        HeaderMode::Absent => false,
        HeaderMode::Auto => text
            .split(',')
            .nth(YEAR_FIELD)
            .is_none_or(|year| year.trim().parse::<u32>().is_err()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_all(lines: &[&str], config: &Config) -> Result<RegionTable, PopError> {
        lines
            .iter()
            .enumerate()
            .map(|(i, text)| Line::new(i + 1, *text))
            .try_fold(RegionTable::new(), |table, line| table.fold(&line, config))
    }

    #[test]
    fn test_before_and_after_recorded() {
        let table = fold_all(&["2016,A,-,100", "2021,A,-,150"], &Config::default()).unwrap();
        assert_eq!(
            table.get("A"),
            Some(&GrowthRecord {
                before: 100,
                after: 150
            })
        );
        assert_eq!(table.stats().matched, 2);
    }

    #[test]
    fn test_other_years_discarded() {
        let table = fold_all(
            &["2015,A,-,90", "2016,A,-,100", "2020,B,-,5"],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("B").is_none());
        assert_eq!(table.stats().ignored, 2);
    }

    #[test]
    fn test_missing_year_defaults_to_zero() {
        let table = fold_all(&["2021,New,-,40"], &Config::default()).unwrap();
        assert_eq!(
            table.get("New"),
            Some(&GrowthRecord {
                before: 0,
                after: 40
            })
        );
    }

    #[test]
    fn test_duplicate_row_overwrites() {
        let table = fold_all(
            &["2016,A,-,100", "2016,A,-,120", "2021,A,-,1", "2021,A,-,2"],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(
            table.get("A"),
            Some(&GrowthRecord {
                before: 120,
                after: 2
            })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_first_appearance_order() {
        let table = fold_all(
            &["2021,C,-,1", "2016,A,-,1", "2016,C,-,1", "2021,B,-,1"],
            &Config::default(),
        )
        .unwrap();
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_auto_header_dropped() {
        let table = fold_all(
            &["集計年,都道府県名,10〜14歳の人口,15〜19歳の人口", "2016,A,-,1"],
            &Config::default(),
        )
        .unwrap();
        assert!(table.stats().header_dropped);
        assert_eq!(table.stats().skipped, 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_auto_keeps_numeric_first_line() {
        let table = fold_all(&["2016,A,-,1"], &Config::default()).unwrap();
        assert!(!table.stats().header_dropped);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_header_present_drops_data_line() {
        let config = Config {
            header: HeaderMode::Present,
            ..Config::default()
        };
        let table = fold_all(&["2016,A,-,1", "2016,B,-,1"], &config).unwrap();
        assert!(table.get("A").is_none());
        assert!(table.get("B").is_some());
    }

    #[test]
    fn test_header_absent_counts_header_as_invalid() {
        let config = Config {
            header: HeaderMode::Absent,
            ..Config::default()
        };
        let table = fold_all(&["year,region,x,pop", "2016,A,-,1"], &config).unwrap();
        assert!(!table.stats().header_dropped);
        assert_eq!(table.stats().skipped, 1);
    }

    #[test]
    fn test_invalid_row_skipped() {
        let table = fold_all(
            &["2016,A,-,100", "2016,B,-,n/a", "2021,A,-,90"],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(table.stats().skipped, 1);
        assert!(table.get("B").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_invalid_row_fails() {
        let config = Config {
            on_invalid: InvalidRowPolicy::Fail,
            ..Config::default()
        };
        let err = fold_all(&["2016,A,-,100", "2016,B,-,n/a"], &config).unwrap_err();
        match err {
            PopError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_lines_ignored() {
        let table = fold_all(&["2016,A,-,1", "", "  "], &Config::default()).unwrap();
        assert_eq!(table.stats().lines, 3);
        assert_eq!(table.stats().ignored, 2);
        assert_eq!(table.stats().skipped, 0);
    }

    #[test]
    fn test_custom_years() {
        let config = Config {
            base_year: 2000,
            compare_year: 2010,
            ..Config::default()
        };
        let table = fold_all(&["2000,A,-,10", "2010,A,-,20", "2016,A,-,99"], &config).unwrap();
        assert_eq!(
            table.get("A"),
            Some(&GrowthRecord {
                before: 10,
                after: 20
            })
        );
    }
}
