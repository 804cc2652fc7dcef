use std::path::{Path, PathBuf};

use super::error::DataError;
use super::loader::{self, IngestMode};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

/// Find measurement files directly under `dir` with the given extension
/// (case-insensitive). Paths are sorted so a run is reproducible across
/// platforms; downstream statistics do not depend on the order.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DataError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DataError::SourceUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataError::SourceUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if path.is_file() && ext.eq_ignore_ascii_case(extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Concatenate the records of the given measurement files into one dataset.
///
/// Zero paths yields an empty dataset; the zero-files policy lives in
/// [`load_directory`]. Identical records from two files are both kept.
pub fn aggregate(paths: &[PathBuf], mode: IngestMode) -> Result<Dataset, DataError> {
    let mut records = Vec::new();
    for path in paths {
        let loaded = loader::load_file(path, mode)?;
        log::info!("loaded {} records from {}", loaded.len(), path.display());
        records.extend(loaded);
    }
    Ok(Dataset::from_records(records))
}

/// Pipeline entry point: discover files under `dir` and aggregate them.
///
/// Matching zero files is fatal here: an empty analysis is almost always a
/// misconfigured directory.
pub fn load_directory(
    dir: &Path,
    extension: &str,
    mode: IngestMode,
) -> Result<Dataset, DataError> {
    let paths = discover_files(dir, extension)?;
    if paths.is_empty() {
        return Err(DataError::NoInputFiles {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    aggregate(&paths, mode)
}
