//! Per-instrument daily history.
//!
//! An [`InstrumentHistory`] holds the header of its source table and one
//! [`Observation`] per trading day. Construction sorts by date, keeps the last
//! row for a repeated date and rejects empty input, so every history in a
//! dataset is non-empty and strictly ascending.

use crate::domain::code::InstrumentCode;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Parse a calendar date from the formats found in exported daily bars.
/// Any time-of-day part is discarded.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    pub fn from_cell(cell: &str) -> Self {
        let s = cell.trim();
        if s.is_empty() {
            FieldValue::Missing
        } else if let Ok(n) = s.parse::<f64>() {
            FieldValue::Number(n)
        } else {
            FieldValue::Text(s.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    /// One value per entry of [`InstrumentHistory::columns`].
    pub fields: Vec<FieldValue>,
}

#[derive(Debug, Clone)]
pub struct InstrumentHistory {
    code: InstrumentCode,
    columns: Vec<String>,
    rows: Vec<Observation>,
}

impl InstrumentHistory {
    /// Returns `None` when `rows` is empty.
    pub fn new(
        code: InstrumentCode,
        columns: Vec<String>,
        mut rows: Vec<Observation>,
    ) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        // Stable sort keeps file order among equal dates; the last one wins.
        rows.sort_by_key(|r| r.date);
        let mut deduped: Vec<Observation> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(prev) if prev.date == row.date => *prev = row,
                _ => deduped.push(row),
            }
        }
        Some(Self {
            code,
            columns,
            rows: deduped,
        })
    }

    pub fn code(&self) -> &InstrumentCode {
        &self.code
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.rows[0].date
    }

    pub fn latest_date(&self) -> NaiveDate {
        self.rows[self.rows.len() - 1].date
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Observations dated on or before `date`.
    pub fn up_to(&self, date: NaiveDate) -> &[Observation] {
        let end = self.rows.partition_point(|r| r.date <= date);
        &self.rows[..end]
    }

    /// Numeric values of `column` on or before `date`, skipping missing and
    /// non-numeric cells. `None` if the column does not exist.
    pub fn numbers_up_to(&self, column: &str, date: NaiveDate) -> Option<Vec<f64>> {
        let idx = self.column_index(column)?;
        Some(
            self.up_to(date)
                .iter()
                .filter_map(|r| r.fields.get(idx).and_then(FieldValue::as_number))
                .collect(),
        )
    }
}
