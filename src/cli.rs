use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::filter::DimensionFilter;
use crate::data::loader::IngestMode;
use crate::data::model::Dimension;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Box-plot viewer for certificate-issuance benchmark measurements.
///
/// Reads the per-client measurement files written by the benchmark harness,
/// merges them into one dataset, and shows the time-to-certificate
/// distribution per configuration dimension.
#[derive(Debug, Parser)]
#[command(name = "certplot", version, about)]
pub struct Options {
    /// Directory containing the per-client measurement files.
    #[arg(long, default_value = "./measurements")]
    pub dir: PathBuf,

    /// File extension the discovery pattern matches.
    #[arg(long, default_value = "csv")]
    pub extension: String,

    /// Treat input files as bare time-to-certificate values, one per line.
    #[arg(long)]
    pub headerless: bool,

    /// Keep only records matching <DIM>=<VALUE>, e.g. num-nodes=4.
    #[arg(long, value_name = "DIM=VALUE")]
    pub filter: Option<DimensionFilter>,

    /// Configuration dimension on the x axis.
    #[arg(long, value_enum, default_value = "csr-size")]
    pub group_by: GroupChoice,

    /// Draw points beyond the whiskers instead of hiding them.
    #[arg(long)]
    pub show_outliers: bool,

    /// Let the time axis start at the data minimum instead of zero.
    #[arg(long)]
    pub no_zero_floor: bool,

    /// Write the computed summaries to a JSON file instead of opening a
    /// window.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// x-axis choice; `none` collapses everything into a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupChoice {
    CsrSize,
    NumNodes,
    None,
}

impl GroupChoice {
    pub fn dimension(self) -> Option<Dimension> {
        match self {
            GroupChoice::CsrSize => Some(Dimension::CsrSize),
            GroupChoice::NumNodes => Some(Dimension::NumNodes),
            GroupChoice::None => None,
        }
    }
}

impl Options {
    pub fn ingest_mode(&self) -> IngestMode {
        if self.headerless {
            IngestMode::HeaderlessSingleColumn
        } else {
            IngestMode::Headered
        }
    }

    /// Chart title, e.g. `time-to-certificate by csr-size (num-nodes=4)`.
    pub fn chart_title(&self) -> String {
        let mut title = match self.group_by.dimension() {
            Some(dim) => format!("time-to-certificate by {dim}"),
            None => "time-to-certificate".to_string(),
        };
        if let Some(filter) = self.filter {
            title.push_str(&format!(" ({filter})"));
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_harness_setup() {
        let opts = Options::parse_from(["certplot"]);
        assert_eq!(opts.dir, PathBuf::from("./measurements"));
        assert_eq!(opts.extension, "csv");
        assert_eq!(opts.ingest_mode(), IngestMode::Headered);
        assert_eq!(opts.group_by.dimension(), Some(Dimension::CsrSize));
        assert!(!opts.show_outliers);
        assert!(!opts.no_zero_floor);
        assert!(opts.filter.is_none());
        assert!(opts.export.is_none());
    }

    #[test]
    fn filter_and_grouping_parse_from_flags() {
        let opts = Options::parse_from([
            "certplot",
            "--filter",
            "num-nodes=4",
            "--group-by",
            "num-nodes",
            "--headerless",
        ]);
        let filter = opts.filter.unwrap();
        assert_eq!(filter.dimension, Dimension::NumNodes);
        assert_eq!(opts.group_by.dimension(), Some(Dimension::NumNodes));
        assert_eq!(opts.ingest_mode(), IngestMode::HeaderlessSingleColumn);
        assert_eq!(
            opts.chart_title(),
            "time-to-certificate by num-nodes (num-nodes=4)"
        );
    }

    #[test]
    fn bad_filter_is_rejected_at_parse_time() {
        assert!(Options::try_parse_from(["certplot", "--filter", "nodes=4"]).is_err());
    }
}
