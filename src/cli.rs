//! CLI definition and pipeline orchestration.

use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::file_settings_adapter::FileSettingsAdapter;
use crate::adapters::json_selector_adapter::load_selector_entries;
use crate::adapters::report_adapter::{LogReportAdapter, WriterReportAdapter};
use crate::adapters::stocklist_adapter::load_catalog;
use crate::domain::dataset::{SkippedInstrument, load_dataset};
use crate::domain::error::ScreenerError;
use crate::domain::eval_date::resolve_evaluation_date;
use crate::domain::pipeline::{SelectionResult, run_selectors};
use crate::domain::report::render_report;
use crate::domain::selector::registry::{SelectorRegistry, SkippedEntry};
use crate::logging;
use crate::ports::history_port::HistoryPort;
use crate::ports::report_port::ReportPort;
use crate::ports::settings_port::SettingsPort;

pub const SETTINGS_SECTION: &str = "screener";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CONFIG: &str = "./configs.json";
pub const DEFAULT_STOCKLIST: &str = "./stocklist.csv";
pub const ALL_TICKERS: &str = "all";

#[derive(Parser, Debug, Default)]
#[command(name = "stockpick", about = "Run the selectors defined in a JSON config over daily bars")]
pub struct Cli {
    /// Directory of per-instrument CSV files [default: ./data]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Selector configuration [default: ./configs.json]
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Stock list used for names, regions and industries [default: ./stocklist.csv]
    #[arg(long)]
    pub stocklist: Option<PathBuf>,
    /// Trade date YYYY-MM-DD; defaults to the latest date in the data
    #[arg(long)]
    pub date: Option<String>,
    /// 'all' or a comma-separated list of codes [default: all]
    #[arg(long)]
    pub tickers: Option<String>,
    /// Log file receiving a copy of all output [default: select_results.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// INI file whose [screener] section supplies defaults for the options above
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Also write the bare report to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Print the registered selector names and exit
    #[arg(long)]
    pub list_selectors: bool,
}

/// Fully resolved run options.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub config: PathBuf,
    pub stocklist: PathBuf,
    pub date: Option<String>,
    pub tickers: String,
    pub log_file: PathBuf,
    pub output: Option<PathBuf>,
}

impl RunOptions {
    /// Command-line values win over settings, settings over built-in defaults.
    pub fn resolve(cli: &Cli, settings: Option<&dyn SettingsPort>) -> Self {
        let setting = |key: &str| settings.and_then(|s| s.get_string(SETTINGS_SECTION, key));
        let path = |flag: &Option<PathBuf>, key: &str, default: &str| {
            flag.clone()
                .or_else(|| setting(key).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            data_dir: path(&cli.data_dir, "data_dir", DEFAULT_DATA_DIR),
            config: path(&cli.config, "config", DEFAULT_CONFIG),
            stocklist: path(&cli.stocklist, "stocklist", DEFAULT_STOCKLIST),
            date: cli.date.clone().or_else(|| setting("date")),
            tickers: cli
                .tickers
                .clone()
                .or_else(|| setting("tickers"))
                .unwrap_or_else(|| ALL_TICKERS.to_string()),
            log_file: path(&cli.log_file, "log_file", logging::DEFAULT_LOG_FILE),
            output: cli.output.clone().or_else(|| setting("output").map(PathBuf::from)),
        }
    }
}

/// What a completed run produced, for callers that need more than the report.
#[derive(Debug)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub results: Vec<SelectionResult>,
    pub skipped_instruments: Vec<SkippedInstrument>,
    pub skipped_entries: Vec<SkippedEntry>,
    pub report: Vec<String>,
}

/// `all` (any case) lists the source; anything else is a comma-separated list.
pub fn resolve_codes(tickers: &str, source: &dyn HistoryPort) -> Result<Vec<String>, ScreenerError> {
    if tickers.trim().eq_ignore_ascii_case(ALL_TICKERS) {
        return source.list_codes();
    }
    Ok(tickers
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match cli.settings.as_deref().map(load_settings).transpose() {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let opts = RunOptions::resolve(&cli, settings.as_ref().map(|s| s as &dyn SettingsPort));

    if let Err(err) = logging::init(Some(opts.log_file.as_path())) {
        eprintln!("error: cannot open log file {}: {err}", opts.log_file.display());
        return (&err).into();
    }

    let registry = SelectorRegistry::with_builtins();
    if cli.list_selectors {
        for name in registry.names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run_pipeline(&opts, &registry, &mut LogReportAdapter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            (&err).into()
        }
    }
}

fn load_settings(path: &Path) -> Result<FileSettingsAdapter, ScreenerError> {
    FileSettingsAdapter::from_file(path).map_err(|e| ScreenerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Every fatal condition is checked before the first selector runs.
pub fn run_pipeline(
    opts: &RunOptions,
    registry: &SelectorRegistry,
    report: &mut dyn ReportPort,
) -> Result<RunSummary, ScreenerError> {
    let catalog = load_catalog(&opts.stocklist);

    if !opts.data_dir.is_dir() {
        return Err(ScreenerError::DataDirMissing {
            path: opts.data_dir.display().to_string(),
        });
    }
    let source = CsvHistoryAdapter::new(opts.data_dir.clone());

    let codes = resolve_codes(&opts.tickers, &source)?;
    if codes.is_empty() {
        return Err(ScreenerError::EmptyUniverse);
    }

    let loaded = load_dataset(&source, &codes)?;
    let date = resolve_evaluation_date(opts.date.as_deref(), &loaded.dataset)?;

    let entries = load_selector_entries(&opts.config)?;
    let built = registry.build(&entries);

    let results = run_selectors(&built.selectors, date, &loaded.dataset);
    let lines = render_report(&results, &catalog);
    report.write_lines(&lines)?;
    if let Some(path) = &opts.output {
        WriterReportAdapter::create(path)?.write_lines(&lines)?;
    }

    Ok(RunSummary {
        date,
        results,
        skipped_instruments: loaded.skipped,
        skipped_entries: built.skipped,
        report: lines,
    })
}
