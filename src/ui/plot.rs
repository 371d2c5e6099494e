use std::ops::RangeInclusive;

use eframe::egui::{Align2, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use super::truncate_label;
use crate::color::{accent, generate_palette};
use crate::pipeline::Output;

/// Longest journal name shown under a bar before it is cut.
const JOURNAL_LABEL_CHARS: usize = 30;
const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the three dashboard charts for the current pipeline output.
pub fn charts(ui: &mut Ui, output: &Output) {
    ui.heading("Data Visualizations");

    if output.schema.has_publish_time {
        ui.strong("Publications Over Time");
        yearly_plot(ui, &output.yearly_counts);
        ui.add_space(8.0);
    }

    ui.strong(format!("Top {} Journals by Paper Count", output.top_journals.len()));
    journal_chart(ui, &output.top_journals);
    ui.add_space(8.0);

    ui.strong(format!("Top {} Words in Paper Titles", output.top_words.len()));
    word_chart(ui, &output.top_words);
}

/// Papers per year as a line with point markers.
fn yearly_plot(ui: &mut Ui, counts: &[(i32, usize)]) {
    let pts: Vec<[f64; 2]> = counts
        .iter()
        .map(|&(year, n)| [year as f64, n as f64])
        .collect();

    Plot::new("yearly_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Number of Papers")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            integer_label(mark.value).unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = pts.iter().copied().collect();
            let markers: PlotPoints = pts.iter().copied().collect();
            plot_ui.line(Line::new(line_points).name("Papers").color(accent()).width(2.0));
            plot_ui.points(Points::new(markers).radius(4.0).color(accent()));
        });
}

/// Top journals as vertical bars, one colour per journal.
fn journal_chart(ui: &mut Ui, journals: &[(String, usize)]) {
    let palette = generate_palette(journals.len());
    let bars: Vec<Bar> = journals
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((name, n), color))| {
            Bar::new(i as f64, *n as f64)
                .name(name)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = journals
        .iter()
        .map(|(name, _)| truncate_label(name, JOURNAL_LABEL_CHARS))
        .collect();

    Plot::new("journal_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Journals")
        .y_axis_label("Number of Papers")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            slot_label(&labels, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Papers"));
            for (pos, label) in count_tips(journals, false) {
                plot_ui.text(Text::new(pos, label).anchor(Align2::CENTER_BOTTOM));
            }
        });
}

/// Top title words as horizontal bars, most frequent at the top.
fn word_chart(ui: &mut Ui, words: &[(String, usize)]) {
    let bars: Vec<Bar> = words
        .iter()
        .enumerate()
        .map(|(i, (word, n))| Bar::new(-(i as f64), *n as f64).name(word).width(0.7))
        .collect();
    let labels: Vec<String> = words.iter().map(|(word, _)| word.clone()).collect();

    Plot::new("word_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Frequency")
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            slot_label(&labels, -mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(accent()).name("Words"));
            for (pos, label) in count_tips(words, true) {
                plot_ui.text(Text::new(pos, label).anchor(Align2::LEFT_CENTER));
            }
        });
}

/// Count labels at the tip of each bar. Horizontal bars sit at negative slots.
fn count_tips(items: &[(String, usize)], horizontal: bool) -> Vec<(PlotPoint, String)> {
    items
        .iter()
        .enumerate()
        .map(|(i, (_, n))| {
            let pos = if horizontal {
                PlotPoint::new(*n as f64, -(i as f64))
            } else {
                PlotPoint::new(i as f64, *n as f64)
            };
            (pos, n.to_string())
        })
        .collect()
}

// -- Axis helpers --

/// Label only whole-number grid marks.
fn integer_label(value: f64) -> Option<String> {
    let rounded = value.round();
    ((value - rounded).abs() < 1e-6).then(|| format!("{rounded:.0}"))
}

/// Label for the bar sitting at integer slot `value`, if there is one.
fn slot_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_on_integer_slots() {
        let labels = vec!["Lancet".to_string(), "BMJ".to_string()];
        assert_eq!(slot_label(&labels, 0.0), "Lancet");
        assert_eq!(slot_label(&labels, 1.0), "BMJ");
        assert_eq!(slot_label(&labels, 0.5), "");
        assert_eq!(slot_label(&labels, 2.0), "");
        assert_eq!(slot_label(&labels, -1.0), "");

        assert_eq!(integer_label(2020.0).as_deref(), Some("2020"));
        assert_eq!(integer_label(2020.5), None);
    }

    #[test]
    fn count_labels_sit_on_bar_tips() {
        let items = vec![("covid".to_string(), 12), ("virus".to_string(), 7)];

        let vertical = count_tips(&items, false);
        assert_eq!((vertical[1].0.x, vertical[1].0.y), (1.0, 7.0));
        assert_eq!(vertical[0].1, "12");

        let horizontal = count_tips(&items, true);
        assert_eq!((horizontal[1].0.x, horizontal[1].0.y), (7.0, -1.0));
        assert_eq!(horizontal[1].1, "7");
    }
}
