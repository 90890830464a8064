#![allow(dead_code)]

use chrono::NaiveDate;
use stockpick::cli::RunOptions;
use stockpick::domain::code::InstrumentCode;
use stockpick::domain::dataset::Dataset;
use stockpick::domain::error::ScreenerError;
use stockpick::domain::selector::{Selector, SelectorError, SelectorParams};
use stockpick::ports::report_port::ReportPort;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Report sink that keeps every line in memory.
#[derive(Default)]
pub struct CollectingReport {
    pub lines: Vec<String>,
}

impl ReportPort for CollectingReport {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), ScreenerError> {
        self.lines.extend_from_slice(lines);
        Ok(())
    }
}

/// A data directory, stock list and config laid out like a real install.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("configs.json")
    }

    pub fn stocklist_path(&self) -> PathBuf {
        self.root().join("stocklist.csv")
    }

    /// Writes `<code>.csv` with one row per `(date, close, volume)`.
    pub fn with_history(self, code: &str, rows: &[(&str, f64, f64)]) -> Self {
        let mut content = String::from("date,open,high,low,close,volume\n");
        for (date, close, volume) in rows {
            content.push_str(&format!(
                "{date},{close},{close},{close},{close},{volume}\n"
            ));
        }
        fs::write(self.data_dir().join(format!("{code}.csv")), content).unwrap();
        self
    }

    pub fn with_raw_history(self, code: &str, content: &str) -> Self {
        fs::write(self.data_dir().join(format!("{code}.csv")), content).unwrap();
        self
    }

    pub fn with_config(self, json: &str) -> Self {
        fs::write(self.config_path(), json).unwrap();
        self
    }

    pub fn with_stocklist(self, csv: &str) -> Self {
        fs::write(self.stocklist_path(), csv).unwrap();
        self
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            data_dir: self.data_dir(),
            config: self.config_path(),
            stocklist: self.stocklist_path(),
            date: None,
            tickers: "all".to_string(),
            log_file: self.root().join("select_results.log"),
            output: None,
        }
    }
}

/// The two-instrument pool used across tests: A ends 2024-01-10, B ends
/// 2024-01-12.
pub fn two_instrument_workspace() -> Workspace {
    Workspace::new()
        .with_history(
            "000001",
            &[("2024-01-09", 10.0, 100.0), ("2024-01-10", 10.5, 120.0)],
        )
        .with_history(
            "000002",
            &[
                ("2024-01-10", 20.0, 200.0),
                ("2024-01-11", 21.0, 210.0),
                ("2024-01-12", 22.0, 900.0),
            ],
        )
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn codes(picks: &[InstrumentCode]) -> Vec<&str> {
    picks.iter().map(|c| c.as_str()).collect()
}

/// Selector that always fails at evaluation time.
pub struct Exploding;

impl Selector for Exploding {
    fn select(
        &self,
        _date: NaiveDate,
        _dataset: &Dataset,
    ) -> Result<Vec<InstrumentCode>, SelectorError> {
        Err(SelectorError::Evaluation("exploded".into()))
    }
}

pub fn exploding(_params: &SelectorParams) -> Result<Box<dyn Selector>, SelectorError> {
    Ok(Box::new(Exploding))
}
