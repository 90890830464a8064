//! Selectors shipped with the crate.
//!
//! - `AlwaysPick`: every instrument in the dataset.
//! - `CloseAboveMovingAverage`: latest close strictly above its N-day SMA.
//! - `VolumeSurge`: latest volume at least `multiple` times the mean of the
//!   preceding N days.

use crate::domain::code::InstrumentCode;
use crate::domain::dataset::Dataset;
use crate::domain::selector::registry::SelectorRegistry;
use crate::domain::selector::{Selector, SelectorError, SelectorParams};
use chrono::NaiveDate;
use serde::Deserialize;

pub fn register_all(registry: &mut SelectorRegistry) {
    registry.register("AlwaysPick", AlwaysPick::create);
    registry.register("CloseAboveMovingAverage", CloseAboveMovingAverage::create);
    registry.register("VolumeSurge", VolumeSurge::create);
}

/// Simple mean of `values`, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn invalid(implementation: &str, reason: &str) -> SelectorError {
    SelectorError::InvalidParams {
        implementation: implementation.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

#[derive(Debug, Clone, Copy)]
pub struct AlwaysPick;

impl AlwaysPick {
    fn create(params: &SelectorParams) -> Result<Box<dyn Selector>, SelectorError> {
        params.decode::<NoParams>("AlwaysPick")?;
        Ok(Box::new(AlwaysPick))
    }
}

impl Selector for AlwaysPick {
    fn select(
        &self,
        _date: NaiveDate,
        dataset: &Dataset,
    ) -> Result<Vec<InstrumentCode>, SelectorError> {
        Ok(dataset.codes().cloned().collect())
    }
}

fn default_ma_window() -> usize {
    20
}

fn default_close() -> String {
    "close".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloseAboveMovingAverage {
    #[serde(default = "default_ma_window")]
    pub window: usize,
    #[serde(default = "default_close")]
    pub column: String,
}

impl CloseAboveMovingAverage {
    const NAME: &'static str = "CloseAboveMovingAverage";

    fn create(params: &SelectorParams) -> Result<Box<dyn Selector>, SelectorError> {
        let selector: Self = params.decode(Self::NAME)?;
        if selector.window == 0 {
            return Err(invalid(Self::NAME, "window must be at least 1"));
        }
        Ok(Box::new(selector))
    }

    fn matches(&self, values: &[f64]) -> bool {
        if values.len() < self.window {
            return false;
        }
        let recent = &values[values.len() - self.window..];
        match (recent.last(), mean(recent)) {
            (Some(&latest), Some(sma)) => latest > sma,
            _ => false,
        }
    }
}

impl Selector for CloseAboveMovingAverage {
    fn select(
        &self,
        date: NaiveDate,
        dataset: &Dataset,
    ) -> Result<Vec<InstrumentCode>, SelectorError> {
        Ok(dataset
            .iter()
            .filter(|(_, history)| {
                history
                    .numbers_up_to(&self.column, date)
                    .is_some_and(|values| self.matches(&values))
            })
            .map(|(code, _)| code.clone())
            .collect())
    }
}

fn default_surge_window() -> usize {
    5
}

fn default_multiple() -> f64 {
    2.0
}

fn default_volume() -> String {
    "volume".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeSurge {
    #[serde(default = "default_surge_window")]
    pub window: usize,
    #[serde(default = "default_multiple")]
    pub multiple: f64,
    #[serde(default = "default_volume")]
    pub column: String,
}

impl VolumeSurge {
    const NAME: &'static str = "VolumeSurge";

    fn create(params: &SelectorParams) -> Result<Box<dyn Selector>, SelectorError> {
        let selector: Self = params.decode(Self::NAME)?;
        if selector.window == 0 {
            return Err(invalid(Self::NAME, "window must be at least 1"));
        }
        if selector.multiple <= 0.0 {
            return Err(invalid(Self::NAME, "multiple must be positive"));
        }
        Ok(Box::new(selector))
    }

    fn matches(&self, values: &[f64]) -> bool {
        let Some((&latest, before)) = values.split_last() else {
            return false;
        };
        if before.len() < self.window {
            return false;
        }
        let prior = &before[before.len() - self.window..];
        mean(prior).is_some_and(|avg| latest >= self.multiple * avg)
    }
}

impl Selector for VolumeSurge {
    fn select(
        &self,
        date: NaiveDate,
        dataset: &Dataset,
    ) -> Result<Vec<InstrumentCode>, SelectorError> {
        Ok(dataset
            .iter()
            .filter(|(_, history)| {
                history
                    .numbers_up_to(&self.column, date)
                    .is_some_and(|values| self.matches(&values))
            })
            .map(|(code, _)| code.clone())
            .collect())
    }
}
