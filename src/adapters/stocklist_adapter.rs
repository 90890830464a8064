//! Stock list CSV catalog adapter.

use crate::domain::catalog::{Catalog, ColumnMap};
use crate::domain::error::ScreenerError;
use std::path::Path;
use tracing::{info, warn};

fn unusable(path: &Path, reason: impl ToString) -> ScreenerError {
    ScreenerError::MetadataUnusable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn read_catalog(path: &Path) -> Result<Catalog, ScreenerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| unusable(path, e))?;

    let headers = rdr.headers().map_err(|e| unusable(path, e))?.clone();
    let header_names: Vec<&str> = headers.iter().collect();
    let columns = ColumnMap::resolve(&header_names).map_err(|e| unusable(path, e))?;

    let records = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| unusable(path, e))?;

    Ok(Catalog::from_rows(columns, records.iter().map(|r| r.iter())))
}

/// Never fails: a missing or unreadable stock list yields an empty catalog
/// and a warning.
pub fn load_catalog(path: &Path) -> Catalog {
    if !path.exists() {
        warn!(
            "stock list {} not found, reporting without names",
            path.display()
        );
        return Catalog::empty();
    }

    match read_catalog(path) {
        Ok(catalog) => {
            info!(
                "loaded metadata for {} instruments from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        Err(e) => {
            warn!("{e}");
            Catalog::empty()
        }
    }
}
