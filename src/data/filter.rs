use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::model::{Dataset, Dimension, DimensionValue, MeasurementRecord};

// ---------------------------------------------------------------------------
// Equality predicate over one dimension (pipeline filter)
// ---------------------------------------------------------------------------

/// Restricts the dataset to records where one configuration dimension
/// equals a value, e.g. `num-nodes=4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub value: DimensionValue,
}

impl DimensionFilter {
    /// A record lacking the dimension never matches.
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        record.dimension(self.dimension) == Some(self.value)
    }
}

impl fmt::Display for DimensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension, self.value)
    }
}

impl FromStr for DimensionFilter {
    type Err = String;

    /// Parse `<dimension>=<value>`. The value is parsed with the
    /// dimension's own type so it compares equal to loaded records.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dim, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <dimension>=<value>, got '{s}'"))?;
        let dimension: Dimension = dim.trim().parse()?;
        let value = match dimension {
            Dimension::CsrSize => DimensionValue::Float(
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("'{value}' is not a valid csr-size"))?,
            ),
            Dimension::NumNodes => DimensionValue::Integer(i64::from(
                value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("'{value}' is not a valid node count"))?,
            )),
        };
        Ok(DimensionFilter { dimension, value })
    }
}

/// Restrict a dataset to records matching the predicate, preserving
/// relative order. `None` returns the dataset unchanged. The input is
/// never mutated.
pub fn apply(dataset: &Dataset, predicate: Option<DimensionFilter>) -> Dataset {
    match predicate {
        None => dataset.clone(),
        Some(filter) => Dataset::from_records(
            dataset
                .records
                .iter()
                .copied()
                .filter(|rec| filter.matches(rec))
                .collect(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Per-value selections (interactive viewer)
// ---------------------------------------------------------------------------

/// Per-dimension selection state for the viewer: dimension → set of values
/// currently shown. A fully selected dimension imposes no constraint.
pub type SelectionState = BTreeMap<Dimension, BTreeSet<DimensionValue>>;

/// Initialise a [`SelectionState`] with every value selected (show all).
pub fn init_selection(dataset: &Dataset) -> SelectionState {
    dataset
        .unique_values
        .iter()
        .map(|(dim, vals)| (*dim, vals.clone()))
        .collect()
}

/// Records passing all active selections.
///
/// A record passes a dimension when:
/// * every value of that dimension is selected → no constraint
/// * the selection set is empty → nothing selected → fails
/// * the record's value is in the selected set → passes
/// * the record lacks the dimension and the selection is partial → fails
pub fn selected_records(dataset: &Dataset, selections: &SelectionState) -> Vec<MeasurementRecord> {
    dataset
        .records
        .iter()
        .filter(|rec| {
            for (dim, selected) in selections {
                if selected.is_empty() {
                    return false;
                }
                if let Some(all_vals) = dataset.unique_values.get(dim) {
                    if selected.len() == all_vals.len() {
                        continue; // everything selected, no filtering needed
                    }
                }
                match rec.dimension(*dim) {
                    Some(val) => {
                        if !selected.contains(&val) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        })
        .copied()
        .collect()
}
