//! Tracing subscriber setup.
//!
//! Events go to stdout and, when a log file is given, are appended to it
//! without ANSI colors. The level comes from `RUST_LOG` and defaults to
//! `info`. Report lines (target `report`) stay at `info` whatever `RUST_LOG`
//! says.

use crate::domain::error::ScreenerError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const DEFAULT_LOG_FILE: &str = "select_results.log";

const DEFAULT_DIRECTIVE: &str = "info";
const REPORT_DIRECTIVE: &str = "report=info";

/// `env` (normally `RUST_LOG`) plus the report directive. An unparseable
/// `env` falls back to the default level.
pub fn build_filter(env: Option<&str>) -> EnvFilter {
    let base = env
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::try_new(format!("{base},{REPORT_DIRECTIVE}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("{DEFAULT_DIRECTIVE},{REPORT_DIRECTIVE}")))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(log_file: Option<&Path>) -> Result<(), ScreenerError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref());

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        debug!("keeping existing subscriber: {err}");
    }

    Ok(())
}
