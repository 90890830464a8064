//! Evaluation-date resolution.

use crate::domain::dataset::Dataset;
use crate::domain::error::ScreenerError;
use crate::domain::history::parse_date;
use chrono::NaiveDate;
use tracing::info;

/// An explicit date wins and is not checked against the dataset. Otherwise
/// the latest date observed by any instrument is used.
pub fn resolve_evaluation_date(
    explicit: Option<&str>,
    dataset: &Dataset,
) -> Result<NaiveDate, ScreenerError> {
    if let Some(input) = explicit {
        return parse_date(input).ok_or_else(|| ScreenerError::InvalidDate {
            input: input.to_string(),
            reason: "expected YYYY-MM-DD".into(),
        });
    }

    let latest = latest_observed(dataset).ok_or(ScreenerError::UnresolvableDate)?;
    info!("no --date given, using latest observed date {latest}");
    Ok(latest)
}

pub fn latest_observed(dataset: &Dataset) -> Option<NaiveDate> {
    dataset
        .iter()
        .filter(|(_, h)| !h.is_empty())
        .map(|(_, h)| h.latest_date())
        .max()
}
