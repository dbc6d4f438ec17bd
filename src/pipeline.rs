//! Runs the three stages in sequence.
//!
//! Lines are folded into a `RegionTable` while the source has input. Once it
//! is exhausted the table is moved into `finalize`, so the accumulation
//! phase cannot be re-entered.

use std::io;

use tracing::{debug, info};

use crate::aggregate::RegionTable;
use crate::config::Config;
use crate::error::PopError;
use crate::rank::rank;
use crate::report::Report;
use crate::source::{Line, LineSource};

/// Fold every line, then rank the result.
pub fn run_lines<I>(lines: I, config: &Config) -> Result<Report, PopError>
where
    I: IntoIterator<Item = Result<Line, PopError>>,
{
    config.validate()?;
    let table = lines
        .into_iter()
        .try_fold(RegionTable::new(), |table, line| table.fold(&line?, config))?;
    Ok(finalize(table, config))
}

/// End of input: compute ratios, sort and number the regions.
pub fn finalize(table: RegionTable, config: &Config) -> Report {
    let (records, stats) = table.into_parts();
    debug!(regions = records.len(), "finalizing");
    let ranking = rank(records, config.direction);
    info!(
        lines = stats.lines,
        matched = stats.matched,
        ignored = stats.ignored,
        skipped = stats.skipped,
        regions = ranking.len(),
        "ranking complete"
    );
    Report {
        ranking,
        stats,
        precision: config.precision,
    }
}

/// Run over an in-memory string.
pub fn run_str(input: &str, config: &Config) -> Result<Report, PopError> {
    run_lines(LineSource::from_reader(input.as_bytes(), "<memory>"), config)
}

/// Run over `config.input`, or stdin when it is `-`.
pub fn run(config: &Config) -> Result<Report, PopError> {
    config.validate()?;
    info!(
        input = %config.input.display(),
        base_year = config.base_year,
        compare_year = config.compare_year,
        "reading input"
    );
    if config.reads_stdin() {
        run_lines(LineSource::from_reader(io::stdin().lock(), "<stdin>"), config)
    } else {
        run_lines(LineSource::open(&config.input)?, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortDirection;
    use crate::rank::Change;

    const SCENARIO: &str = "2016,A,-,100\n2021,A,-,150\n2016,B,-,200\n2021,B,-,100\n";

    #[test]
    fn test_scenario_ranking() {
        let report = run_str(SCENARIO, &Config::default()).unwrap();
        assert_eq!(report.len(), 2);

        let first = &report.ranking[0];
        assert_eq!((first.rank, first.region.as_str()), (1, "B"));
        assert_eq!((first.before, first.after), (200, 100));
        assert_eq!(first.change, Change::Ratio(0.5));

        let second = &report.ranking[1];
        assert_eq!((second.rank, second.region.as_str()), (2, "A"));
        assert_eq!((second.before, second.after), (100, 150));
        assert_eq!(second.change, Change::Ratio(1.5));

        assert_eq!(
            report.render(),
            "1位 B: 200 => 100 変化率： 0.5\n2位 A: 100 => 150 変化率： 1.5"
        );
    }

    #[test]
    fn test_idempotent() {
        let first = run_str(SCENARIO, &Config::default()).unwrap();
        let second = run_str(SCENARIO, &Config::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_compare_only_region_does_not_crash() {
        let report = run_str("2016,A,-,10\n2021,A,-,5\n2021,New,-,7\n", &Config::default())
            .unwrap();
        let last = report.ranking.last().unwrap();
        assert_eq!(last.region, "New");
        assert_eq!(last.change, Change::NoBaseline);
        assert_eq!(last.before, 0);
    }

    #[test]
    fn test_output_length_is_distinct_matching_regions() {
        let input = "2016,A,-,1\n2021,A,-,1\n2021,B,-,1\n2019,C,-,1\n2016,D,-,3\n";
        let report = run_str(input, &Config::default()).unwrap();
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_descending() {
        let config = Config {
            direction: SortDirection::Desc,
            ..Config::default()
        };
        let report = run_str(SCENARIO, &config).unwrap();
        assert_eq!(report.ranking[0].region, "A");
        assert_eq!(report.ranking[0].rank, 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_reading() {
        let config = Config {
            base_year: 2021,
            ..Config::default()
        };
        assert!(matches!(
            run_str(SCENARIO, &config),
            Err(PopError::Config(_))
        ));
    }

    #[test]
    fn test_source_error_aborts() {
        let lines = vec![
            Ok(Line::new(1, "2016,A,-,1")),
            Err(PopError::Io {
                path: "x".into(),
                source: io::Error::other("boom"),
            }),
        ];
        assert!(matches!(
            run_lines(lines, &Config::default()),
            Err(PopError::Io { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let report = run_str("", &Config::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.stats.lines, 0);
    }
}
