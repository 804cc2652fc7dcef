use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the ingestion layer.
///
/// All of these are fatal for the run: the tool analyzes a fixed set of
/// local files once, so there is nothing to retry and no partial result
/// worth keeping.
#[derive(Debug, Error)]
pub enum DataError {
    /// The measurements directory or one of its files cannot be read.
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Discovery matched zero measurement files.
    #[error("no *.{extension} files found under {dir}")]
    NoInputFiles { dir: PathBuf, extension: String },

    /// A line failed to parse as its expected numeric type.
    #[error("{path}:{line}: malformed record: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The CSV reader itself failed (ragged quoting, I/O mid-file, …).
    #[error("reading {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
