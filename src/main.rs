mod app;
mod chart;
mod cli;
mod color;
mod data;
mod state;
mod stats;
mod ui;

use anyhow::Result;
use clap::Parser;

use chart::{ChartOptions, ChartSink, JsonSink, WindowSink};
use cli::Options;
use data::{aggregate, filter};

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::parse();

    // Load → Aggregate
    let dataset = aggregate::load_directory(&options.dir, &options.extension, options.ingest_mode())?;
    log::info!(
        "{} records from {}",
        dataset.len(),
        options.dir.display()
    );

    // Filter
    let dataset = filter::apply(&dataset, options.filter);
    if let Some(f) = options.filter {
        log::info!("{} records after {f}", dataset.len());
    }

    // Render
    let chart = ChartOptions {
        title: options.chart_title(),
        group_by: options.group_by.dimension(),
        show_outliers: options.show_outliers,
        zero_floor: !options.no_zero_floor,
    };
    let sink: Box<dyn ChartSink> = match &options.export {
        Some(path) => Box::new(JsonSink { path: path.clone() }),
        None => Box::new(WindowSink),
    };
    sink.present(dataset, chart)
}

// ---------------------------------------------------------------------------
// End-to-end pipeline tests (no window)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::data::loader::IngestMode;
    use crate::data::model::Dimension;
    use crate::stats;

    use super::*;

    #[test]
    fn load_filter_summarize_export() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.csv"),
            "csr-size,num-nodes,time-to-certificate\n100,4,50\n200,4,70\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.csv"),
            "csr-size,num-nodes,time-to-certificate\n100,8,55\n",
        )
        .unwrap();

        let dataset =
            aggregate::load_directory(dir.path(), "csv", IngestMode::Headered).unwrap();
        assert_eq!(dataset.len(), 3);

        let predicate = "num-nodes=4".parse().unwrap();
        let four_nodes = filter::apply(&dataset, Some(predicate));
        assert_eq!(four_nodes.len(), 2);

        let groups = stats::grouped_summaries(&four_nodes.records, None);
        assert_eq!(groups[0].summary.median, 60.0);

        let out = dir.path().join("summary.json");
        let sink = Box::new(JsonSink { path: out.clone() });
        sink.present(
            four_nodes,
            ChartOptions {
                title: "e2e".to_string(),
                group_by: Some(Dimension::CsrSize),
                show_outliers: false,
                zero_floor: true,
            },
        )
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["groups"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn headerless_pipeline_summarizes_bare_durations() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("times.csv"), "10\n20\n30\n40\n").unwrap();

        let dataset =
            aggregate::load_directory(dir.path(), "csv", IngestMode::HeaderlessSingleColumn)
                .unwrap();
        assert_eq!(dataset.len(), 4);
        assert!(dataset.unique_values.is_empty());

        let groups = stats::grouped_summaries(&dataset.records, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].summary.median, 25.0);

        // grouping by an absent dimension excludes everything, no panic
        assert!(stats::grouped_summaries(&dataset.records, Some(Dimension::NumNodes)).is_empty());
    }
}
