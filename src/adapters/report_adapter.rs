//! Report sinks.
//!
//! [`LogReportAdapter`] routes every line through `tracing`, so the console
//! and the log file receive the same content. [`WriterReportAdapter`] writes
//! bare lines to any `io::Write`, used for `--output`.

use crate::domain::error::ScreenerError;
use crate::ports::report_port::ReportPort;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogReportAdapter;

impl ReportPort for LogReportAdapter {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), ScreenerError> {
        for line in lines {
            info!(target: "report", "{line}");
        }
        Ok(())
    }
}

pub struct WriterReportAdapter<W: Write> {
    writer: W,
}

impl<W: Write> WriterReportAdapter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterReportAdapter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, ScreenerError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ReportPort for WriterReportAdapter<W> {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), ScreenerError> {
        for line in lines {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
