//! CLI tool to rank regions by population growth.
//!
//! Usage:
//!   pop-rank [input.csv]
//!   pop-rank input.csv --base-year 2016 --compare-year 2021 --sort desc
//!   pop-rank input.csv -o report.txt
//!
//! If no output file is specified, writes to stdout.

use clap::Parser;
use pop_rank::{Config, HeaderMode, InvalidRowPolicy, PopError, SortDirection, config, run};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Rank regions by the ratio of their comparison-year population to their
/// base-year population.
#[derive(Parser)]
#[command(name = "pop-rank")]
struct Cli {
    /// Input file (year,region,-,population rows), or - for stdin
    #[arg(default_value = config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Year the change is measured from
    #[arg(long, default_value_t = config::DEFAULT_BASE_YEAR)]
    base_year: u32,

    /// Year the change is measured to
    #[arg(long, default_value_t = config::DEFAULT_COMPARE_YEAR)]
    compare_year: u32,

    /// Ranking order by growth ratio
    #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
    sort: SortDirection,

    /// Print ratios with this many decimal places
    #[arg(long)]
    precision: Option<usize>,

    /// How to treat the first line
    #[arg(long, value_enum, default_value_t = HeaderMode::Auto)]
    header: HeaderMode,

    /// What to do with rows whose year or population is not a number
    #[arg(long, value_enum, default_value_t = InvalidRowPolicy::Skip)]
    on_invalid: InvalidRowPolicy,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log progress and row counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            input: self.input.clone(),
            base_year: self.base_year,
            compare_year: self.compare_year,
            direction: self.sort,
            precision: self.precision,
            header: self.header,
            on_invalid: self.on_invalid,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), PopError> {
    let text = if text.is_empty() {
        String::new()
    } else {
        format!("{text}\n")
    };
    match path {
        Some(out_path) => {
            let io_err = |source: io::Error| PopError::Io {
                path: out_path.to_path_buf(),
                source,
            };
            if let Some(parent) = out_path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
            fs::write(out_path, &text).map_err(io_err)
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| PopError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = match run(&cli.config()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error ({}): {e}", e.stage());
            process::exit(1);
        }
    };

    let text = report.render();
    if let Err(e) = write_output(cli.output.as_deref(), &text) {
        eprintln!("error (output): {e}");
        process::exit(1);
    }

    if let Some(out_path) = &cli.output {
        info!(path = %out_path.display(), regions = report.len(), "report written");
    }
}
