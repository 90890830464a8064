//! Domain error types.

/// Top-level error type for stockpick.
///
/// Variants split into two groups: fatal run-level failures that stop the
/// pipeline before any selector executes, and per-item failures that callers
/// log and skip.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("data directory {path} does not exist")]
    DataDirMissing { path: String },

    #[error("instrument pool is empty")]
    EmptyUniverse,

    #[error("no instrument history could be loaded ({requested} requested)")]
    NoHistoriesLoaded { requested: usize },

    #[error("no instrument has a valid date, cannot resolve evaluation date")]
    UnresolvableDate,

    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("selector config {path} does not exist")]
    ConfigMissing { path: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("selector config defines no selectors")]
    EmptySelectorConfig,

    #[error("invalid instrument code {raw:?}")]
    InvalidCode { raw: String },

    #[error("history file {path} not found")]
    HistoryMissing { path: String },

    #[error("malformed history {path}: {reason}")]
    HistoryMalformed { path: String, reason: String },

    #[error("history {path} has no rows with a valid date")]
    HistoryEmpty { path: String },

    #[error("metadata source {path} unusable: {reason}")]
    MetadataUnusable { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigParse { .. }
            | ScreenerError::EmptySelectorConfig => 2,
            ScreenerError::DataDirMissing { .. }
            | ScreenerError::EmptyUniverse
            | ScreenerError::NoHistoriesLoaded { .. }
            | ScreenerError::InvalidCode { .. }
            | ScreenerError::HistoryMissing { .. }
            | ScreenerError::HistoryMalformed { .. }
            | ScreenerError::HistoryEmpty { .. }
            | ScreenerError::MetadataUnusable { .. } => 3,
            ScreenerError::UnresolvableDate | ScreenerError::InvalidDate { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
