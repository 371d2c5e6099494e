use eframe::egui::{self, Color32, RichText, Ui};

use super::format_count;
use crate::data::aggregate::Summary;
use crate::data::model::{SourceSchema, YearRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Filters");
    ui.separator();

    let Some(store) = state.store.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Year range ----
    match (store.year_extent(), state.year_selection) {
        (Some(extent), Some(selection)) => {
            ui.strong("Select Year Range");
            let mut from = selection.min;
            let mut to = selection.max;
            ui.add(egui::Slider::new(&mut from, extent.min..=extent.max).text("from"));
            ui.add(egui::Slider::new(&mut to, extent.min..=extent.max).text("to"));
            if from != selection.min || to != selection.max {
                state.set_year_selection(YearRange::new(from, to));
            }
        }
        _ => {
            ui.label(RichText::new("No publication years in this dataset.").italics());
        }
    }
    ui.separator();

    // ---- Sample size ----
    ui.strong("Sample Size (for performance)");
    let min = state.config.sample_size_min;
    let max = state.sample_slider_max();
    let mut size = state.sample_size;
    let mut slider =
        egui::Slider::new(&mut size, min..=max).clamping(egui::SliderClamping::Always);
    // An off-grid max would be rounded away by the slider; AppState snaps instead.
    if state.config.slider_max_on_grid(state.filtered_count()) {
        slider = slider.step_by(state.config.sample_size_step as f64);
    }
    ui.add(slider);
    if size != state.sample_size {
        state.set_sample_size(size);
    }

    ui.separator();
    if ui.button("Reload data").clicked() {
        state.reload();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source_path {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.label(format!("Source: {name}"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Overview and quick stats
// ---------------------------------------------------------------------------

/// Render the page header, warnings, and the two metric columns.
pub fn overview(ui: &mut Ui, state: &AppState) {
    ui.heading("CORD-19 Data Explorer");
    ui.label("Interactive exploration of COVID-19 research papers");
    ui.separator();

    let Some(out) = &state.output else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Failed to load data. Open a metadata file (File → Open…).");
        });
        return;
    };

    for warning in &out.warnings {
        ui.label(RichText::new(warning.to_string()).color(Color32::from_rgb(230, 160, 30)));
    }

    let summary = &out.summary;
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Dataset Overview");
        egui::Grid::new("overview_metrics")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(&mut cols[0], |ui: &mut Ui| {
                metric(ui, "Total Papers", format_count(summary.total_papers));
                metric(ui, "Filtered Papers", format_count(summary.filtered_papers));
                metric(ui, "Display Sample", format_count(summary.display_papers));
                if let Some(range) = summary.year_range {
                    metric(ui, "Year Range", range.to_string());
                }
            });

        cols[1].strong("Quick Stats");
        egui::Grid::new("quick_stats")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(&mut cols[1], |ui: &mut Ui| {
                for (label, value) in quick_stats(summary, &out.schema) {
                    metric(ui, label, value);
                }
            });
    });
}

/// Quick-stat rows; the abstract metric needs an `abstract` column.
fn quick_stats(summary: &Summary, schema: &SourceSchema) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Unique Journals", format_count(summary.unique_journals))];
    if let Some(avg) = summary.avg_title_length {
        rows.push(("Avg Title Length", format!("{avg:.0} chars")));
    }
    if schema.has_abstract {
        if let Some(avg) = summary.avg_abstract_words {
            rows.push(("Avg Abstract Length", format!("{avg:.0} words")));
        }
    }
    rows
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(20.0).strong());
    ui.end_row();
}

/// Render the footer.
pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Data Source:").strong());
        ui.label("CORD-19 Dataset");
        ui.separator();
        ui.label(RichText::new("Built with:").strong());
        ui.label("egui, egui_plot, Arrow");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
