//! Report output port trait.

use crate::domain::error::ScreenerError;

/// Sink for rendered report lines.
pub trait ReportPort {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), ScreenerError>;
}
