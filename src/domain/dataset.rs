//! The shared, read-only instrument pool for one run.
//!
//! [`load_dataset`] resolves a list of raw candidate codes against a
//! [`HistoryPort`], skipping (and logging) every instrument that cannot be
//! loaded. Only an entirely empty result is fatal.

use crate::domain::code::InstrumentCode;
use crate::domain::error::ScreenerError;
use crate::domain::history::InstrumentHistory;
use crate::ports::history_port::HistoryPort;
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashSet;
use tracing::{info, warn};

/// Mapping from code to history, iterated in ascending code order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    histories: BTreeMap<InstrumentCode, InstrumentHistory>,
}

impl Dataset {
    pub fn from_histories(histories: impl IntoIterator<Item = InstrumentHistory>) -> Self {
        Self {
            histories: histories
                .into_iter()
                .map(|h| (h.code().clone(), h))
                .collect(),
        }
    }

    pub fn get(&self, code: &InstrumentCode) -> Option<&InstrumentHistory> {
        self.histories.get(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &InstrumentCode> {
        self.histories.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, InstrumentCode, InstrumentHistory> {
        self.histories.iter()
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = (&'a InstrumentCode, &'a InstrumentHistory);
    type IntoIter = btree_map::Iter<'a, InstrumentCode, InstrumentHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.histories.iter()
    }
}

#[derive(Debug)]
pub struct SkippedInstrument {
    pub code: String,
    pub reason: ScreenerError,
}

pub struct LoadResult {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedInstrument>,
}

pub fn load_dataset(
    source: &dyn HistoryPort,
    candidates: &[String],
) -> Result<LoadResult, ScreenerError> {
    if candidates.is_empty() {
        return Err(ScreenerError::EmptyUniverse);
    }

    let mut histories = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for raw in candidates {
        let code = match InstrumentCode::parse(raw) {
            Ok(c) => c,
            Err(e) => {
                warn!("skipping {raw}: {e}");
                skipped.push(SkippedInstrument {
                    code: raw.clone(),
                    reason: e,
                });
                continue;
            }
        };
        if !seen.insert(code.clone()) {
            continue;
        }

        match source.fetch_history(&code) {
            Ok(history) => histories.push(history),
            Err(e) => {
                warn!("skipping {code}: {e}");
                skipped.push(SkippedInstrument {
                    code: code.to_string(),
                    reason: e,
                });
            }
        }
    }

    if histories.is_empty() {
        return Err(ScreenerError::NoHistoriesLoaded {
            requested: candidates.len(),
        });
    }

    let dataset = Dataset::from_histories(histories);
    info!(
        "loaded {} of {} instruments ({} skipped)",
        dataset.len(),
        seen.len(),
        skipped.len()
    );

    Ok(LoadResult { dataset, skipped })
}
