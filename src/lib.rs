//! # pop-rank
//!
//! Ranks regions by population growth between two census years.
//!
//! ## Overview
//!
//! The input is a comma-separated file with one row per region and year:
//! - **Field 0**: year
//! - **Field 1**: region name
//! - **Field 3**: population (field 2 and anything past field 3 are ignored)
//!
//! Processing happens in three stages:
//! - **Line source**: lines are streamed from the file one at a time
//! - **Aggregation**: rows from the base and comparison years are folded
//!   into a per-region table; later rows overwrite earlier ones
//! - **Ranking**: once input ends, each region's `after / before` ratio is
//!   computed and the regions are sorted by it, smallest first
//!
//! A region with no base-year population gets the `NoBaseline` change,
//! which sorts after every finite ratio.
//!
//! ## Example
//!
//! ```
//! use pop_rank::{Config, run_str};
//!
//! let input = "2016,A,-,100\n2021,A,-,150\n2016,B,-,200\n2021,B,-,100\n";
//! let report = run_str(input, &Config::default()).unwrap();
//!
//! assert_eq!(
//!     report.lines(),
//!     vec![
//!         "1位 B: 200 => 100 変化率： 0.5",
//!         "2位 A: 100 => 150 変化率： 1.5",
//!     ]
//! );
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod row;
pub mod source;

pub use aggregate::{FoldStats, GrowthRecord, RegionTable};
pub use config::{Config, HeaderMode, InvalidRowPolicy, SortDirection};
pub use error::{PopError, RowError};
pub use pipeline::{finalize, run, run_lines, run_str};
pub use rank::{Change, NO_BASELINE_LABEL, RankedRegion, rank};
pub use report::Report;
pub use row::Row;
pub use source::{Line, LineSource};
