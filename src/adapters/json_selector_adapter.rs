//! JSON selector configuration adapter.

use crate::domain::error::ScreenerError;
use crate::domain::selector::config::normalize_entries;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse a configuration document into its canonical entry list.
pub fn parse_selector_entries(content: &str, file: &str) -> Result<Vec<Value>, ScreenerError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ScreenerError::ConfigParse {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    let entries = normalize_entries(document);
    if entries.is_empty() {
        return Err(ScreenerError::EmptySelectorConfig);
    }
    Ok(entries)
}

pub fn load_selector_entries(path: &Path) -> Result<Vec<Value>, ScreenerError> {
    if !path.is_file() {
        return Err(ScreenerError::ConfigMissing {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_selector_entries(&content, &path.display().to_string())
}
