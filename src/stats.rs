use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{Dimension, DimensionValue, MeasurementRecord};

// ---------------------------------------------------------------------------
// Five-number summary
// ---------------------------------------------------------------------------

/// Tukey box-plot summary of one sample.
///
/// Quartiles use linear interpolation between order statistics; whiskers
/// sit on the most extreme values within 1.5×IQR of the quartiles.
/// Outliers never affect the quartiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    /// Smallest value inside the lower whisker fence.
    pub whisker_low: f64,
    pub quartile1: f64,
    pub median: f64,
    pub quartile3: f64,
    /// Largest value inside the upper whisker fence.
    pub whisker_high: f64,
    /// Values beyond 1.5×IQR of the nearer quartile, ascending.
    pub outliers: Vec<f64>,
}

/// Compute the five-number summary of a sample. `None` for an empty sample.
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let quartile1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let quartile3 = quantile(&sorted, 0.75);

    let iqr = quartile3 - quartile1;
    let lower_fence = quartile1 - 1.5 * iqr;
    let upper_fence = quartile3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= lower_fence)
        .unwrap_or(quartile1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= upper_fence)
        .unwrap_or(quartile3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_fence || *v > upper_fence)
        .collect();

    Some(FiveNumberSummary {
        whisker_low,
        quartile1,
        median,
        quartile3,
        whisker_high,
        outliers,
    })
}

/// Linearly interpolated quantile of a sorted, non-empty sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Grouped summaries
// ---------------------------------------------------------------------------

/// One box glyph: the group's key (`None` for the ungrouped whole) and its
/// summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: Option<DimensionValue>,
    pub label: String,
    pub count: usize,
    pub summary: FiveNumberSummary,
}

/// Summarize `time_to_certificate` per group, ordered by group key.
///
/// With no grouping dimension the whole sample forms a single group.
/// Records lacking the grouping dimension are excluded; groups with zero
/// members are omitted.
pub fn grouped_summaries(
    records: &[MeasurementRecord],
    group_by: Option<Dimension>,
) -> Vec<GroupSummary> {
    match group_by {
        None => {
            let times: Vec<f64> = records.iter().map(|r| r.time_to_certificate).collect();
            five_number_summary(&times)
                .map(|summary| {
                    vec![GroupSummary {
                        key: None,
                        label: "all".to_string(),
                        count: times.len(),
                        summary,
                    }]
                })
                .unwrap_or_default()
        }
        Some(dim) => {
            let mut groups: BTreeMap<DimensionValue, Vec<f64>> = BTreeMap::new();
            for rec in records {
                if let Some(val) = rec.dimension(dim) {
                    groups.entry(val).or_default().push(rec.time_to_certificate);
                }
            }
            groups
                .into_iter()
                .filter_map(|(key, times)| {
                    five_number_summary(&times).map(|summary| GroupSummary {
                        key: Some(key),
                        label: key.to_string(),
                        count: times.len(),
                        summary,
                    })
                })
                .collect()
        }
    }
}
