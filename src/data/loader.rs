use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::DataError;
use super::model::MeasurementRecord;

// ---------------------------------------------------------------------------
// Ingestion mode
// ---------------------------------------------------------------------------

/// How a measurement file is laid out. Chosen once per run by the caller,
/// never inferred from file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// First line names the columns; any subset of the recognized columns
    /// may be present, unknown columns are skipped.
    Headered,
    /// One bare time-to-certificate value per line, no other columns.
    HeaderlessSingleColumn,
}

/// Recognized header spellings. The benchmark clients write kebab-case;
/// snake_case is accepted for hand-edited files.
const TIME_COLUMNS: [&str; 2] = ["time-to-certificate", "time_to_certificate"];
const CSR_COLUMNS: [&str; 2] = ["csr-size", "csr_size"];
const NODE_COLUMNS: [&str; 2] = ["num-nodes", "num_nodes"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one measurement file into an ordered record sequence.
///
/// An empty file yields an empty sequence, not an error. Unreadable files
/// are `SourceUnavailable`; unparsable tokens are `MalformedRecord` naming
/// the offending line.
pub fn load_file(path: &Path, mode: IngestMode) -> Result<Vec<MeasurementRecord>, DataError> {
    match mode {
        IngestMode::Headered => load_headered(path),
        IngestMode::HeaderlessSingleColumn => load_single_column(path),
    }
}

// ---------------------------------------------------------------------------
// Headered CSV
// ---------------------------------------------------------------------------

fn load_headered(path: &Path) -> Result<Vec<MeasurementRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    // flexible: a row missing trailing columns leaves those fields absent.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if headers.is_empty() || (headers.len() == 1 && headers.iter().all(str::is_empty)) {
        // csv yields a single empty header for a zero-byte file
        return Ok(Vec::new());
    }

    let position = |names: [&str; 2]| headers.iter().position(|h| names.contains(&h.trim()));
    let time_idx = position(TIME_COLUMNS).ok_or_else(|| DataError::MalformedRecord {
        path: path.to_path_buf(),
        line: 1,
        reason: "missing a time-to-certificate column".into(),
    })?;
    let csr_idx = position(CSR_COLUMNS);
    let node_idx = position(NODE_COLUMNS);

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = i + 2; // 1-based, after the header line

        let time = match field::<f64>(&row, time_idx, "time-to-certificate", path, line)? {
            Some(v) => validate_time(v, path, line)?,
            None => {
                return Err(DataError::MalformedRecord {
                    path: path.to_path_buf(),
                    line,
                    reason: "missing time-to-certificate value".into(),
                });
            }
        };
        let csr_size = match csr_idx {
            Some(idx) => field::<f64>(&row, idx, "csr-size", path, line)?,
            None => None,
        };
        let num_nodes = match node_idx {
            Some(idx) => field::<u32>(&row, idx, "num-nodes", path, line)?,
            None => None,
        };

        records.push(MeasurementRecord {
            time_to_certificate: time,
            csr_size,
            num_nodes,
        });
    }
    Ok(records)
}

/// Parse one cell. An absent or empty cell is `None`; a non-empty cell that
/// fails to parse aborts the file.
fn field<T: std::str::FromStr>(
    row: &csv::StringRecord,
    idx: usize,
    column: &str,
    path: &Path,
    line: usize,
) -> Result<Option<T>, DataError> {
    let token = row.get(idx).map(str::trim).unwrap_or("");
    if token.is_empty() {
        return Ok(None);
    }
    token
        .parse::<T>()
        .map(Some)
        .map_err(|_| DataError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            reason: format!("{column}: '{token}' is not a number"),
        })
}

// ---------------------------------------------------------------------------
// Headerless single column
// ---------------------------------------------------------------------------

fn load_single_column(path: &Path) -> Result<Vec<MeasurementRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| DataError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let value = token
            .parse::<f64>()
            .map_err(|_| DataError::MalformedRecord {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!("'{token}' is not a number"),
            })?;
        records.push(MeasurementRecord {
            time_to_certificate: validate_time(value, path, i + 1)?,
            csr_size: None,
            num_nodes: None,
        });
    }
    Ok(records)
}

/// A duration must be finite and non-negative.
fn validate_time(value: f64, path: &Path, line: usize) -> Result<f64, DataError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DataError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            reason: format!("time-to-certificate '{value}' is not a non-negative duration"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn headered_file_with_all_columns() {
        let f = write_file(
            "csr-size,num-nodes,time-to-certificate\n\
             100,4,50\n\
             200,4,70\n",
        );
        let records = load_file(f.path(), IngestMode::Headered).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time_to_certificate, 50.0);
        assert_eq!(records[0].csr_size, Some(100.0));
        assert_eq!(records[1].num_nodes, Some(4));
    }

    #[test]
    fn unrecognized_columns_are_ignored() {
        let f = write_file(
            "time-to-certificate,num-nodes,csr-size,adversary-type,adversary-fraction\n\
             73,4,100,none,0\n",
        );
        let records = load_file(f.path(), IngestMode::Headered).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time_to_certificate, 73.0);
        assert_eq!(records[0].num_nodes, Some(4));
        assert_eq!(records[0].csr_size, Some(100.0));
    }

    #[test]
    fn missing_optional_column_leaves_field_absent() {
        let f = write_file("time-to-certificate,num-nodes\n55,8\n");
        let records = load_file(f.path(), IngestMode::Headered).unwrap();
        assert_eq!(records[0].csr_size, None);
        assert_eq!(records[0].num_nodes, Some(8));
    }

    #[test]
    fn empty_cell_leaves_field_absent() {
        let f = write_file("time-to-certificate,num-nodes\n55,\n");
        let records = load_file(f.path(), IngestMode::Headered).unwrap();
        assert_eq!(records[0].num_nodes, None);
    }

    #[test]
    fn unparsable_token_is_malformed_record() {
        let f = write_file("time-to-certificate,num-nodes\nfast,4\n");
        let err = load_file(f.path(), IngestMode::Headered).unwrap_err();
        match err {
            DataError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("fast"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn negative_duration_is_malformed() {
        let f = write_file("time-to-certificate\n-3\n");
        assert!(matches!(
            load_file(f.path(), IngestMode::Headered),
            Err(DataError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn header_without_time_column_is_malformed() {
        let f = write_file("csr-size,num-nodes\n100,4\n");
        let err = load_file(f.path(), IngestMode::Headered).unwrap_err();
        assert!(matches!(err, DataError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn empty_file_yields_no_records() {
        let f = write_file("");
        assert!(load_file(f.path(), IngestMode::Headered).unwrap().is_empty());
        assert!(
            load_file(f.path(), IngestMode::HeaderlessSingleColumn)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = load_file(Path::new("does/not/exist.csv"), IngestMode::Headered).unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { .. }));
    }

    #[test]
    fn headerless_lines_load_as_bare_durations() {
        let f = write_file("10\n20\n30\n40\n");
        let records = load_file(f.path(), IngestMode::HeaderlessSingleColumn).unwrap();
        assert_eq!(records.len(), 4);
        let times: Vec<f64> = records.iter().map(|r| r.time_to_certificate).collect();
        assert_eq!(times, [10.0, 20.0, 30.0, 40.0]);
        assert!(records.iter().all(|r| r.csr_size.is_none()));
        assert!(records.iter().all(|r| r.num_nodes.is_none()));
    }

    #[test]
    fn headerless_rejects_non_numeric_line() {
        let f = write_file("10\nbogus\n");
        let err = load_file(f.path(), IngestMode::HeaderlessSingleColumn).unwrap_err();
        assert!(matches!(err, DataError::MalformedRecord { line: 2, .. }));
    }
}
