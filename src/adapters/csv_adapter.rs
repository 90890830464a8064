//! CSV directory history adapter.
//!
//! One file per instrument, named `<code>.csv`, with a `date` header and any
//! number of other columns. Unpadded names such as `1.csv` resolve to the
//! same code as `000001.csv`; the padded file wins when both exist.

use crate::domain::code::{InstrumentCode, normalize};
use crate::domain::error::ScreenerError;
use crate::domain::history::{FieldValue, InstrumentHistory, Observation, parse_date};
use crate::ports::history_port::HistoryPort;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATE_COLUMN: &str = "date";

pub struct CsvHistoryAdapter {
    base_path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }

    /// The padded `<code>.csv`, or else any csv file whose stem normalizes to
    /// `code`.
    fn locate(&self, code: &InstrumentCode) -> Result<Option<PathBuf>, ScreenerError> {
        let padded = self.csv_path(code.as_str());
        if padded.is_file() {
            return Ok(Some(padded));
        }
        let stem = self
            .csv_stems()?
            .into_iter()
            .find(|stem| normalize(stem) == code.as_str());
        Ok(stem.map(|s| self.csv_path(&s)).filter(|p| p.is_file()))
    }

    fn csv_stems(&self) -> Result<Vec<String>, ScreenerError> {
        let mut stems = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                stems.push(stem.to_string_lossy().into_owned());
            }
        }
        stems.sort();
        Ok(stems)
    }
}

fn malformed(path: &Path, reason: impl ToString) -> ScreenerError {
    ScreenerError::HistoryMalformed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

impl HistoryPort for CsvHistoryAdapter {
    fn list_codes(&self) -> Result<Vec<String>, ScreenerError> {
        self.csv_stems()
    }

    fn fetch_history(&self, code: &InstrumentCode) -> Result<InstrumentHistory, ScreenerError> {
        let Some(path) = self.locate(code)? else {
            return Err(ScreenerError::HistoryMissing {
                path: self.csv_path(code.as_str()).display().to_string(),
            });
        };

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| malformed(&path, e))?;

        let headers = rdr.headers().map_err(|e| malformed(&path, e))?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(DATE_COLUMN))
            .ok_or_else(|| malformed(&path, "missing date column"))?;
        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for result in rdr.records() {
            let record = result.map_err(|e| malformed(&path, e))?;
            let Some(date) = record.get(date_idx).and_then(parse_date) else {
                dropped += 1;
                continue;
            };
            let mut fields: Vec<FieldValue> = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != date_idx)
                .map(|(_, cell)| FieldValue::from_cell(cell))
                .collect();
            fields.resize(columns.len(), FieldValue::Missing);
            rows.push(Observation { date, fields });
        }

        if dropped > 0 {
            debug!("{}: dropped {} rows without a valid date", path.display(), dropped);
        }

        InstrumentHistory::new(code.clone(), columns, rows).ok_or_else(|| {
            ScreenerError::HistoryEmpty {
                path: path.display().to_string(),
            }
        })
    }
}
