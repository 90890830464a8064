//! Pluggable selection rules.
//!
//! A [`Selector`] turns an evaluation date and the shared [`Dataset`] into an
//! ordered list of picks. Selectors are built by name through the
//! [`registry::SelectorRegistry`] from entries of a JSON configuration
//! document (see [`config`]).

pub mod builtin;
pub mod config;
pub mod registry;

use crate::domain::code::InstrumentCode;
use crate::domain::dataset::Dataset;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectorError {
    #[error("entry is not a JSON object")]
    NotAnObject,

    #[error("missing \"class\" field")]
    MissingImplementation,

    #[error("unknown selector {0:?}")]
    UnknownImplementation(String),

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("invalid params for {implementation}: {reason}")]
    InvalidParams {
        implementation: String,
        reason: String,
    },

    #[error("evaluation failed: {0}")]
    Evaluation(String),

    #[error("selector panicked: {0}")]
    Panicked(String),
}

/// A selection rule. Implementations only read the dataset and should only
/// consider observations dated on or before `date`.
pub trait Selector {
    fn select(
        &self,
        date: NaiveDate,
        dataset: &Dataset,
    ) -> Result<Vec<InstrumentCode>, SelectorError>;
}

/// The opaque `params` object of a configuration entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorParams(Map<String, Value>);

impl SelectorParams {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Decode into the typed parameter struct of one selector kind.
    pub fn decode<T: DeserializeOwned>(&self, implementation: &str) -> Result<T, SelectorError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            SelectorError::InvalidParams {
                implementation: implementation.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// A constructed selector tagged with its display alias.
pub struct NamedSelector {
    pub alias: String,
    pub implementation: String,
    pub selector: Box<dyn Selector>,
}

impl std::fmt::Debug for NamedSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedSelector")
            .field("alias", &self.alias)
            .field("implementation", &self.implementation)
            .finish_non_exhaustive()
    }
}
