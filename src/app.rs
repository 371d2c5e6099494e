use eframe::egui::{self, ScrollArea, Ui};

use crate::config::ExplorerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    /// Build the app and open the configured data file.
    pub fn new(config: ExplorerConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.open(&data_path);
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, sample table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::overview(ui, &self.state);
                    if let Some(output) = &self.state.output {
                        ui.separator();
                        plot::charts(ui, output);
                        ui.separator();
                        table::sample_table(ui, &output.sample_rows);
                    }
                });
        });
    }
}
