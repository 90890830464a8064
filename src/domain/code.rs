//! Instrument code normalization.
//!
//! Every map in the crate is keyed by [`InstrumentCode`], a six digit,
//! zero-padded identifier. Raw codes from file names, command-line lists and
//! the stock list all pass through [`normalize`] before use.

use crate::domain::error::ScreenerError;
use std::fmt;

pub const CODE_WIDTH: usize = 6;

/// Trim and left-pad `raw` with zeros to [`CODE_WIDTH`]. Longer input is
/// returned trimmed but otherwise untouched.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    format!("{:0>width$}", trimmed, width = CODE_WIDTH)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstrumentCode(String);

impl InstrumentCode {
    pub fn parse(raw: &str) -> Result<Self, ScreenerError> {
        let code = normalize(raw);
        let valid = !raw.trim().is_empty()
            && code.len() == CODE_WIDTH
            && code.bytes().all(|b| b.is_ascii_digit());
        if valid {
            Ok(Self(code))
        } else {
            Err(ScreenerError::InvalidCode {
                raw: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstrumentCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
