//! Growth ratios and the ranking built from them.

use std::cmp::Ordering;
use std::fmt;

use crate::aggregate::GrowthRecord;
use crate::config::SortDirection;

/// Printed in place of a ratio for regions without a base-year population.
pub const NO_BASELINE_LABEL: &str = "基準年データなし";

/// Comparison-year population over base-year population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Ratio(f64),
    /// Base-year population is zero or absent, so the ratio is unbounded.
    NoBaseline,
}

impl Change {
    pub fn of(record: &GrowthRecord) -> Self {
        if record.before == 0 {
            Change::NoBaseline
        } else {
            Change::Ratio(record.after as f64 / record.before as f64)
        }
    }

    /// Total order with `NoBaseline` above every ratio.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Change::Ratio(a), Change::Ratio(b)) => a.total_cmp(b),
            (Change::Ratio(_), Change::NoBaseline) => Ordering::Less,
            (Change::NoBaseline, Change::Ratio(_)) => Ordering::Greater,
            (Change::NoBaseline, Change::NoBaseline) => Ordering::Equal,
        }
    }

    /// Render with `precision` decimal places, or the shortest exact form.
    pub fn format(&self, precision: Option<usize>) -> String {
        match (self, precision) {
            (Change::Ratio(r), Some(p)) => format!("{r:.p$}"),
            (Change::Ratio(r), None) => r.to_string(),
            (Change::NoBaseline, _) => NO_BASELINE_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(f.precision()))
    }
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRegion {
    /// 1-based position in the sorted output.
    pub rank: usize,
    pub region: String,
    pub before: u64,
    pub after: u64,
    pub change: Change,
}

impl RankedRegion {
    pub fn format(&self, precision: Option<usize>) -> String {
        format!(
            "{}位 {}: {} => {} 変化率： {}",
            self.rank,
            self.region,
            self.before,
            self.after,
            self.change.format(precision)
        )
    }
}

impl fmt::Display for RankedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(f.precision()))
    }
}

/// Compute every region's change and sort by it.
///
/// The sort is stable in both directions: regions with equal change keep
/// the order they were given in.
pub fn rank(records: Vec<(String, GrowthRecord)>, direction: SortDirection) -> Vec<RankedRegion> {
    let mut with_change: Vec<(String, GrowthRecord, Change)> = records
        .into_iter()
        .map(|(region, record)| {
            let change = Change::of(&record);
            (region, record, change)
        })
        .collect();

    match direction {
        SortDirection::Asc => with_change.sort_by(|a, b| a.2.total_cmp(&b.2)),
        SortDirection::Desc => with_change.sort_by(|a, b| b.2.total_cmp(&a.2)),
    }

    with_change
        .into_iter()
        .enumerate()
        .map(|(i, (region, record, change))| RankedRegion {
            rank: i + 1,
            region,
            before: record.before,
            after: record.after,
            change,
        })
        .collect()
}
