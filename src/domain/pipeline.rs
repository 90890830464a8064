//! Runs each constructed selector once against the shared dataset.

use crate::domain::code::InstrumentCode;
use crate::domain::dataset::Dataset;
use crate::domain::selector::{NamedSelector, SelectorError};
use chrono::NaiveDate;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub alias: String,
    pub date: NaiveDate,
    /// Empty when the selector failed.
    pub picks: Vec<InstrumentCode>,
    pub failure: Option<SelectorError>,
}

impl SelectionResult {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Evaluate one selector. A returned error or a panic becomes a failed
/// result with no picks.
pub fn run_selector(named: &NamedSelector, date: NaiveDate, dataset: &Dataset) -> SelectionResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| named.selector.select(date, dataset)))
        .unwrap_or_else(|payload| Err(SelectorError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(picks) => {
            info!("selector {} picked {} instruments", named.alias, picks.len());
            SelectionResult {
                alias: named.alias.clone(),
                date,
                picks,
                failure: None,
            }
        }
        Err(e) => {
            error!(
                "selector {} ({}) failed on {date}: {e}",
                named.alias, named.implementation
            );
            SelectionResult {
                alias: named.alias.clone(),
                date,
                picks: Vec::new(),
                failure: Some(e),
            }
        }
    }
}

/// Selectors run in the given order; every one sees the same date and
/// dataset reference.
pub fn run_selectors(
    selectors: &[NamedSelector],
    date: NaiveDate,
    dataset: &Dataset,
) -> Vec<SelectionResult> {
    selectors
        .iter()
        .map(|named| run_selector(named, date, dataset))
        .collect()
}
