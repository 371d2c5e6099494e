use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use super::truncate_label;
use crate::pipeline::SampleRow;

/// Abstracts are cut to this many characters in the table.
const ABSTRACT_PREVIEW_CHARS: usize = 160;
const ROW_HEIGHT: f32 = 20.0;

/// Render the sample table. The abstract column appears only when the rows carry one.
pub fn sample_table(ui: &mut Ui, rows: &[SampleRow]) {
    ui.heading("Data Sample");
    ui.strong("Sample of Papers");

    if rows.is_empty() {
        ui.label("No suitable rows to display.");
        return;
    }
    let with_abstract = rows.iter().any(|r| r.abstract_text.is_some());

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(360.0).at_least(120.0).clip(true))
        .column(Column::initial(200.0).at_least(80.0).clip(true))
        .column(Column::auto().at_least(40.0));
    if with_abstract {
        table = table.column(Column::remainder().clip(true));
    }

    table
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("title");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("journal");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("publish_year");
            });
            if with_abstract {
                header.col(|ui: &mut Ui| {
                    ui.strong("abstract");
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.title);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.journal);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(row.publish_year.map(|y| y.to_string()).unwrap_or_default());
                    });
                    if let Some(text) = &row.abstract_text {
                        table_row.col(|ui: &mut Ui| {
                            ui.label(truncate_label(text, ABSTRACT_PREVIEW_CHARS))
                                .on_hover_text(text);
                        });
                    }
                });
            }
        });
}
