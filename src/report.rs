//! The finished ranking and its text rendering.

use crate::aggregate::FoldStats;
use crate::rank::RankedRegion;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub ranking: Vec<RankedRegion>,
    pub stats: FoldStats,
    pub precision: Option<usize>,
}

impl Report {
    /// One formatted line per region, in rank order.
    pub fn lines(&self) -> Vec<String> {
        self.ranking
            .iter()
            .map(|r| r.format(self.precision))
            .collect()
    }

    /// All lines joined with `\n`, without a trailing newline.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}
