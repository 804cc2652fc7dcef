use std::collections::BTreeSet;

use crate::chart::ChartOptions;
use crate::color::ColorMap;
use crate::data::filter::{init_selection, selected_records, SelectionState};
use crate::data::model::{Dataset, Dimension, DimensionValue, MeasurementRecord};
use crate::stats::{self, GroupSummary};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewState {
    /// The unified dataset; never mutated after construction.
    pub dataset: Dataset,

    /// Per-dimension value selections.
    pub selections: SelectionState,

    /// Dimension on the x axis; `None` shows a single box.
    pub group_by: Option<Dimension>,

    /// Draw outlier points beyond the whiskers.
    pub show_outliers: bool,

    /// Pin the time axis to start at zero.
    pub zero_floor: bool,

    /// Chart title shown in the top bar.
    pub title: String,

    /// Records passing the current selections (cached).
    pub visible: Vec<MeasurementRecord>,

    /// Box summaries for the current view (cached).
    pub summaries: Vec<GroupSummary>,

    /// Colours per group key.
    pub color_map: ColorMap,
}

impl ViewState {
    /// Seed the viewer from the pipeline's dataset and display choices.
    pub fn new(dataset: Dataset, options: ChartOptions) -> Self {
        let selections = init_selection(&dataset);
        let mut state = ViewState {
            dataset,
            selections,
            group_by: options.group_by,
            show_outliers: options.show_outliers,
            zero_floor: options.zero_floor,
            title: options.title,
            visible: Vec::new(),
            summaries: Vec::new(),
            color_map: ColorMap::empty(),
        };
        state.recompute();
        state
    }

    /// Recompute visible records, summaries, and group colours.
    pub fn recompute(&mut self) {
        self.visible = selected_records(&self.dataset, &self.selections);
        self.summaries = stats::grouped_summaries(&self.visible, self.group_by);
        self.color_map = match self.group_by {
            Some(dim) => self
                .dataset
                .unique_values
                .get(&dim)
                .map(ColorMap::new)
                .unwrap_or_else(ColorMap::empty),
            None => ColorMap::empty(),
        };
    }

    /// Change the grouping dimension and rebuild the view.
    pub fn set_group_by(&mut self, group_by: Option<Dimension>) {
        self.group_by = group_by;
        self.recompute();
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_value(&mut self, dimension: Dimension, value: DimensionValue) {
        let selected = self.selections.entry(dimension).or_default();
        if selected.contains(&value) {
            selected.remove(&value);
        } else {
            selected.insert(value);
        }
        self.recompute();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(all_vals) = self.dataset.unique_values.get(&dimension) {
            self.selections.insert(dimension, all_vals.clone());
            self.recompute();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selections.insert(dimension, BTreeSet::new());
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(t2c: f64, csr: f64, nodes: u32) -> MeasurementRecord {
        MeasurementRecord {
            time_to_certificate: t2c,
            csr_size: Some(csr),
            num_nodes: Some(nodes),
        }
    }

    fn seed() -> ViewState {
        let dataset = Dataset::from_records(vec![
            rec(50.0, 100.0, 4),
            rec(70.0, 100.0, 4),
            rec(55.0, 200.0, 8),
        ]);
        ViewState::new(
            dataset,
            ChartOptions {
                title: "t".to_string(),
                group_by: Some(Dimension::CsrSize),
                show_outliers: false,
                zero_floor: true,
            },
        )
    }

    #[test]
    fn initial_view_shows_everything() {
        let state = seed();
        assert_eq!(state.visible.len(), 3);
        assert_eq!(state.summaries.len(), 2);
    }

    #[test]
    fn toggling_a_value_narrows_the_view() {
        let mut state = seed();
        state.toggle_value(Dimension::NumNodes, DimensionValue::Integer(8));
        assert_eq!(state.visible.len(), 2);
        assert_eq!(state.summaries.len(), 1);
        assert_eq!(state.summaries[0].summary.median, 60.0);

        state.select_all(Dimension::NumNodes);
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn deselecting_everything_empties_the_view_without_panicking() {
        let mut state = seed();
        state.select_none(Dimension::CsrSize);
        assert!(state.visible.is_empty());
        assert!(state.summaries.is_empty());
    }

    #[test]
    fn regrouping_rebuilds_summaries() {
        let mut state = seed();
        state.set_group_by(Some(Dimension::NumNodes));
        assert_eq!(state.summaries.len(), 2);
        state.set_group_by(None);
        assert_eq!(state.summaries.len(), 1);
        assert_eq!(state.summaries[0].count, 3);
    }
}
