//! Instrument metadata (display name, region, industry).
//!
//! Stock lists come from several vendors with different headers, so each field
//! is resolved from an ordered synonym list. Metadata only ever decorates the
//! report; a catalog that cannot be built is empty, never an error for the run.

use crate::domain::code::InstrumentCode;
use std::collections::HashMap;

pub const CODE_COLUMNS: [&str; 3] = ["symbol", "ts_code", "code"];
pub const NAME_COLUMNS: [&str; 2] = ["name", "名称"];
pub const REGION_COLUMNS: [&str; 3] = ["area", "地区", "地域"];
pub const INDUSTRY_COLUMNS: [&str; 3] = ["industry", "行业", "行业分类"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstrumentMetadata {
    pub name: Option<String>,
    pub region: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<InstrumentCode, InstrumentMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("no code column (expected one of {:?})", CODE_COLUMNS)]
    NoCodeColumn,

    #[error("no name column (expected one of {:?})", NAME_COLUMNS)]
    NoNameColumn,
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub code: usize,
    pub name: usize,
    pub region: Option<usize>,
    pub industry: Option<usize>,
}

fn find_column(headers: &[&str], synonyms: &[&str]) -> Option<usize> {
    synonyms
        .iter()
        .find_map(|syn| headers.iter().position(|h| h == syn))
}

impl ColumnMap {
    /// Header matching is exact and case-sensitive.
    pub fn resolve(headers: &[&str]) -> Result<Self, CatalogError> {
        let code = find_column(headers, &CODE_COLUMNS).ok_or(CatalogError::NoCodeColumn)?;
        let name = find_column(headers, &NAME_COLUMNS).ok_or(CatalogError::NoNameColumn)?;
        Ok(Self {
            code,
            name,
            region: find_column(headers, &REGION_COLUMNS),
            industry: find_column(headers, &INDUSTRY_COLUMNS),
        })
    }
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from already-split rows. Rows without a code or name, or whose
    /// normalized code is not six digits, are dropped.
    pub fn from_rows<'a, R>(columns: ColumnMap, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = &'a str>,
    {
        let mut entries = HashMap::new();
        for row in rows {
            let cells: Vec<&str> = row.into_iter().collect();
            let Some(raw_code) = non_empty(cells.get(columns.code).copied()) else {
                continue;
            };
            let Some(name) = non_empty(cells.get(columns.name).copied()) else {
                continue;
            };
            let Ok(code) = InstrumentCode::parse(&raw_code) else {
                continue;
            };
            let region = columns
                .region
                .and_then(|i| non_empty(cells.get(i).copied()));
            let industry = columns
                .industry
                .and_then(|i| non_empty(cells.get(i).copied()));
            entries.insert(
                code,
                InstrumentMetadata {
                    name: Some(name),
                    region,
                    industry,
                },
            );
        }
        Self { entries }
    }

    pub fn get(&self, code: &InstrumentCode) -> Option<&InstrumentMetadata> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
