use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::ViewState;

// ---------------------------------------------------------------------------
// Left side panel – grouping and filter widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut ViewState) {
    ui.heading("View");
    ui.separator();

    // ---- Group-by selector ----
    ui.strong("Group by");
    let current_label = state
        .group_by
        .map(|dim| dim.column_name())
        .unwrap_or("none");
    egui::ComboBox::from_id_salt("group_by")
        .selected_text(current_label)
        .show_ui(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                if ui
                    .selectable_label(state.group_by == Some(dim), dim.column_name())
                    .clicked()
                {
                    state.set_group_by(Some(dim));
                }
            }
            if ui
                .selectable_label(state.group_by.is_none(), "none")
                .clicked()
            {
                state.set_group_by(None);
            }
        });

    ui.add_space(4.0);
    ui.checkbox(&mut state.show_outliers, "Show outliers");
    ui.checkbox(&mut state.zero_floor, "Zero floor");
    ui.separator();

    ui.heading("Filters");
    ui.separator();

    if state.dataset.unique_values.is_empty() {
        ui.label("No configuration dimensions in the data.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let unique = state.dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Per-dimension filter widgets (collapsible) ----
            for (dim, all_values) in &unique {
                let selected = state.selections.entry(*dim).or_default();

                // Show count of selected / total in the header
                let n_selected = selected.len();
                let n_total = all_values.len();
                let header_text = format!("{dim}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column_name())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(*dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(*dim);
                            }
                        });

                        for val in all_values {
                            let is_selected = state
                                .selections
                                .get(dim)
                                .is_some_and(|set| set.contains(val));

                            // Colour swatch when this is the grouping column
                            let mut text = RichText::new(val.to_string());
                            if state.group_by == Some(*dim) {
                                text = text.color(state.color_map.color_for(Some(*val)));
                            }

                            let mut checked = is_selected;
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_value(*dim, *val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: chart title and record counts.
pub fn top_bar(ui: &mut Ui, state: &ViewState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&state.title);
        ui.separator();
        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.visible.len()
        ));
        ui.separator();
        ui.label(format!("{} groups", state.summaries.len()));
    });
}
