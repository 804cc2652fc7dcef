use eframe::egui;

use crate::chart::ChartOptions;
use crate::data::model::Dataset;
use crate::state::ViewState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CertPlotApp {
    pub state: ViewState,
}

/// Open the viewer window; blocks until the viewer dismisses it.
pub fn run(dataset: Dataset, options: ChartOptions) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = ViewState::new(dataset, options);
    eframe::run_native(
        "certplot – time-to-certificate",
        native_options,
        Box::new(move |_cc| Ok(Box::new(CertPlotApp { state }))),
    )
}

impl eframe::App for CertPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and record counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: grouping and filters ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: box plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::box_plot(ui, &self.state);
        });
    }
}
