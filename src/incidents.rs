//! One-shot ingestion of the anti-social-behaviour incident table.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One row of the raw incident table. Multiple rows may share the same
/// `(location, category)` pair; downstream aggregation sums them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncidentRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("cannot open incident table {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed row in incident table {path}: {source}")]
    Malformed { path: PathBuf, source: csv::Error },
}

/// Read the incident table once at startup. The result is immutable for
/// the remainder of the session; an unreadable or unparseable table is
/// fatal because every incident chart depends on it.
pub fn load_incident_table(
    path: &Path,
) -> Result<Vec<IncidentRecord>, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| {
        DataLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: IncidentRecord =
            row.map_err(|source| DataLoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        records.push(record);
    }

    log::info!(
        "Loaded {} incident records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
