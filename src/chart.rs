use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::{Dataset, Dimension};
use crate::stats::{self, GroupSummary};

// ---------------------------------------------------------------------------
// Chart options
// ---------------------------------------------------------------------------

/// Display choices handed to the terminal pipeline stage.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    /// Dimension on the x axis; `None` draws a single box over everything.
    pub group_by: Option<Dimension>,
    /// Draw points beyond the whiskers. They never affect the quartiles.
    pub show_outliers: bool,
    /// Pin the time axis to start at zero.
    pub zero_floor: bool,
}

// ---------------------------------------------------------------------------
// Chart sinks
// ---------------------------------------------------------------------------

/// Terminal stage of the pipeline: either an interactive window or a file.
/// The summary computation itself lives in [`crate::stats`] and carries no
/// display dependency.
pub trait ChartSink {
    fn present(self: Box<Self>, dataset: Dataset, options: ChartOptions) -> Result<()>;
}

/// Opens the egui viewer; blocks until the window is closed.
pub struct WindowSink;

impl ChartSink for WindowSink {
    fn present(self: Box<Self>, dataset: Dataset, options: ChartOptions) -> Result<()> {
        crate::app::run(dataset, options).map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
    }
}

/// Writes the grouped five-number summaries as pretty-printed JSON.
/// Nothing is displayed.
pub struct JsonSink {
    pub path: PathBuf,
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    title: &'a str,
    group_by: Option<&'static str>,
    record_count: usize,
    groups: &'a [GroupSummary],
}

impl ChartSink for JsonSink {
    fn present(self: Box<Self>, dataset: Dataset, options: ChartOptions) -> Result<()> {
        let groups = stats::grouped_summaries(&dataset.records, options.group_by);
        let report = SummaryReport {
            title: &options.title,
            group_by: options.group_by.map(|d| d.column_name()),
            record_count: dataset.len(),
            groups: &groups,
        };
        let json = serde_json::to_string_pretty(&report).context("serializing summaries")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::info!(
            "wrote {} group summaries to {}",
            groups.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::model::MeasurementRecord;

    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            MeasurementRecord {
                time_to_certificate: 50.0,
                csr_size: Some(100.0),
                num_nodes: Some(4),
            },
            MeasurementRecord {
                time_to_certificate: 70.0,
                csr_size: Some(100.0),
                num_nodes: Some(4),
            },
        ])
    }

    fn options(group_by: Option<Dimension>) -> ChartOptions {
        ChartOptions {
            title: "test".to_string(),
            group_by,
            show_outliers: false,
            zero_floor: true,
        }
    }

    #[test]
    fn json_sink_writes_a_parseable_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let sink = Box::new(JsonSink { path: path.clone() });
        sink.present(dataset(), options(Some(Dimension::CsrSize)))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["group_by"], "csr-size");
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["groups"][0]["summary"]["median"], 60.0);
        assert_eq!(value["groups"][0]["key"], 100.0);
    }

    #[test]
    fn json_sink_handles_an_empty_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let sink = Box::new(JsonSink { path: path.clone() });
        sink.present(Dataset::default(), options(None)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["groups"].as_array().unwrap().len(), 0);
    }
}
