use eframe::egui::{Stroke, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::state::ViewState;

// ---------------------------------------------------------------------------
// Box plot (central panel)
// ---------------------------------------------------------------------------

/// Render one box-and-whisker glyph per group in the central panel.
pub fn box_plot(ui: &mut Ui, state: &ViewState) {
    if state.summaries.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records match the current selection");
        });
        return;
    }

    let x_label = state
        .group_by
        .map(|dim| dim.label())
        .unwrap_or("all records");
    let labels: Vec<String> = state.summaries.iter().map(|g| g.label.clone()).collect();

    let mut plot = Plot::new("box_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("time-to-certificate in ms")
        // groups sit at integer x positions; show their labels instead
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if state.zero_floor {
        plot = plot.include_y(0.0);
    }

    plot.show(ui, |plot_ui| {
        for (idx, group) in state.summaries.iter().enumerate() {
            let color = state.color_map.color_for(group.key);
            let x = idx as f64;
            let s = &group.summary;

            let spread = BoxSpread::new(
                s.whisker_low,
                s.quartile1,
                s.median,
                s.quartile3,
                s.whisker_high,
            );
            let glyph = BoxElem::new(x, spread)
                .name(&group.label)
                .fill(color.gamma_multiply(0.3))
                .stroke(Stroke::new(1.5, color))
                .box_width(0.5)
                .whisker_width(0.25);

            plot_ui.box_plot(BoxPlot::new(vec![glyph]).name(&group.label));

            if state.show_outliers && !s.outliers.is_empty() {
                let points: PlotPoints = s.outliers.iter().map(|&y| [x, y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .color(color)
                        .radius(2.0)
                        .name(&group.label),
                );
            }
        }
    });
}
