//! Instrument history access port trait.

use crate::domain::code::InstrumentCode;
use crate::domain::error::ScreenerError;
use crate::domain::history::InstrumentHistory;

pub trait HistoryPort {
    /// Raw codes of every instrument the source can provide, sorted.
    fn list_codes(&self) -> Result<Vec<String>, ScreenerError>;

    /// Load one instrument. Missing, malformed and dateless sources are
    /// errors; callers decide whether to skip them.
    fn fetch_history(&self, code: &InstrumentCode) -> Result<InstrumentHistory, ScreenerError>;
}
