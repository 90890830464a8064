//! Selector configuration entries.
//!
//! A configuration document may be a single selector object, an array of
//! them, or an object holding the array under `"selectors"`. All three are
//! flattened by [`normalize_entries`] right after parsing; everything
//! downstream only sees the canonical list.

use crate::domain::selector::{SelectorError, SelectorParams};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const SELECTORS_KEY: &str = "selectors";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub implementation: String,
    pub alias: String,
    pub params: SelectorParams,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default, rename = "class", alias = "implementation")]
    implementation: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    params: Option<Map<String, Value>>,
    #[serde(default, rename = "activate", alias = "active")]
    active: Option<Value>,
}

pub fn normalize_entries(document: Value) -> Vec<Value> {
    match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) if map.contains_key(SELECTORS_KEY) => {
            match map.remove(SELECTORS_KEY) {
                Some(Value::Array(entries)) => entries,
                Some(other) => vec![other],
                None => Vec::new(),
            }
        }
        other => vec![other],
    }
}

/// Only a literal `false` disables an entry; a missing or non-boolean flag
/// leaves it active.
pub fn is_inactive(entry: &Value) -> bool {
    let flag = entry
        .get("activate")
        .or_else(|| entry.get("active"));
    matches!(flag, Some(Value::Bool(false)))
}

pub fn parse_entry(entry: &Value) -> Result<SelectorConfig, SelectorError> {
    if !entry.is_object() {
        return Err(SelectorError::NotAnObject);
    }
    let raw: RawEntry = serde_json::from_value(entry.clone())
        .map_err(|e| SelectorError::InvalidEntry(e.to_string()))?;

    let implementation = raw
        .implementation
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(SelectorError::MissingImplementation)?;
    let alias = raw
        .alias
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| implementation.clone());

    Ok(SelectorConfig {
        alias,
        params: SelectorParams::new(raw.params.unwrap_or_default()),
        active: !matches!(raw.active, Some(Value::Bool(false))),
        implementation,
    })
}
