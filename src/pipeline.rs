//! One pass of filter → sample → aggregate over the record store.
//!
//! The UI calls [`run`] whenever a slider moves; nothing here keeps state
//! between calls.

use crate::data::aggregate::{self, Summary, TOP_JOURNALS, TOP_WORDS};
use crate::data::filter::{filter_store, YearFilter};
use crate::data::model::{PaperRecord, RecordStore, SourceSchema, YearRange};
use crate::data::sample::{sample_records, DEFAULT_SEED};

/// Rows shown in the sample table.
pub const TABLE_ROWS: usize = 20;

/// Explicit parameters for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    /// Inclusive year bounds; `None` applies the store's full extent.
    pub year_range: Option<YearRange>,
    pub sample_size: usize,
    pub seed: u64,
    pub top_journals: usize,
    pub top_words: usize,
    pub table_rows: usize,
}

impl Default for Query {
    fn default() -> Self {
        Query {
            year_range: None,
            sample_size: 5_000,
            seed: DEFAULT_SEED,
            top_journals: TOP_JOURNALS,
            top_words: TOP_WORDS,
            table_rows: TABLE_ROWS,
        }
    }
}

/// Non-fatal conditions the presentation layer should surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// No record has a parseable publication date; year filtering was skipped.
    NoYearData,
    /// The filter left nothing to show.
    EmptyResult,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NoYearData => write!(f, "No publication years available; showing all papers"),
            Warning::EmptyResult => write!(f, "No papers match the selected filters"),
        }
    }
}

/// One row of the sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub title: String,
    pub journal: String,
    pub publish_year: Option<i32>,
    /// Present only when the source has an `abstract` column.
    pub abstract_text: Option<String>,
}

impl SampleRow {
    fn from_record(record: &PaperRecord, with_abstract: bool) -> Self {
        SampleRow {
            title: record.title().to_string(),
            journal: record.journal().to_string(),
            publish_year: record.publish_year(),
            abstract_text: with_abstract.then(|| record.abstract_text().to_string()),
        }
    }
}

/// Everything the presentation layer needs for one frame of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub summary: Summary,
    pub yearly_counts: Vec<(i32, usize)>,
    pub top_journals: Vec<(String, usize)>,
    pub top_words: Vec<(String, usize)>,
    pub sample_rows: Vec<SampleRow>,
    pub warnings: Vec<Warning>,
    /// Columns the source provided, for hiding metrics and charts it lacks.
    pub schema: SourceSchema,
}

/// Run the pipeline for `query` against `store`.
pub fn run(store: &RecordStore, query: &Query) -> Output {
    let mut warnings = Vec::new();

    let filtered = filter_store(store, query.year_range);
    if matches!(filtered, YearFilter::NoYearData(_)) {
        warnings.push(Warning::NoYearData);
    }
    let applied_range = filtered.range();
    let filtered = filtered.into_records();
    let filtered_count = filtered.len();
    if filtered.is_empty() {
        warnings.push(Warning::EmptyResult);
    }

    let display = sample_records(filtered, query.sample_size, query.seed);
    log::debug!(
        "Pipeline: {} total, {} filtered, {} displayed (range {:?})",
        store.len(),
        filtered_count,
        display.len(),
        applied_range
    );

    let with_abstract = store.schema().has_abstract;
    Output {
        summary: aggregate::summarize(store.len(), filtered_count, applied_range, &display),
        yearly_counts: aggregate::yearly_counts(display.iter().copied()),
        top_journals: aggregate::top_journals(display.iter().copied(), query.top_journals),
        top_words: aggregate::top_title_words(display.iter().copied(), query.top_words),
        sample_rows: display
            .iter()
            .take(query.table_rows)
            .map(|r| SampleRow::from_record(r, with_abstract))
            .collect(),
        warnings,
        schema: store.schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawPaperRow;

    fn store(rows: &[(&str, &str, Option<&str>)]) -> RecordStore {
        let schema = SourceSchema {
            has_title: true,
            has_journal: true,
            has_abstract: false,
            has_publish_time: true,
        };
        let rows = rows.iter().map(|(title, journal, date)| RawPaperRow {
            title: Some(title.to_string()),
            journal: Some(journal.to_string()),
            abstract_text: None,
            publish_time: date.map(str::to_string),
        });
        RecordStore::from_rows(rows, schema)
    }

    #[test]
    fn year_filter_then_yearly_counts() {
        let s = store(&[
            ("a", "J", Some("2019-01-01")),
            ("b", "J", Some("2019-02-01")),
            ("c", "J", Some("2020-01-01")),
            ("d", "J", Some("2021-01-01")),
            ("e", "J", Some("2021-02-01")),
            ("f", "J", Some("2021-03-01")),
        ]);
        let query = Query {
            year_range: Some(YearRange::new(2020, 2021)),
            ..Query::default()
        };
        let out = run(&s, &query);
        assert_eq!(out.yearly_counts, vec![(2020, 1), (2021, 3)]);
        assert_eq!(out.summary.total_papers, 6);
        assert_eq!(out.summary.filtered_papers, 4);
        assert_eq!(out.summary.year_range, Some(YearRange::new(2020, 2021)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn empty_filter_result_warns_and_degrades() {
        let s = store(&[
            ("a", "J", Some("2015-01-01")),
            ("b", "J", Some("2016-01-01")),
            ("c", "J", Some("2018-01-01")),
        ]);
        let query = Query {
            year_range: Some(YearRange::new(2017, 2017)),
            ..Query::default()
        };
        let out = run(&s, &query);
        assert_eq!(out.warnings, vec![Warning::EmptyResult]);
        assert_eq!(out.summary.filtered_papers, 0);
        assert_eq!(out.summary.display_papers, 0);
        assert!(out.yearly_counts.is_empty());
        assert!(out.top_journals.is_empty());
        assert!(out.top_words.is_empty());
        assert!(out.sample_rows.is_empty());
    }

    #[test]
    fn store_without_years_reports_no_year_data() {
        let s = store(&[("a", "J", None), ("b", "K", Some("n/a"))]);
        let out = run(
            &s,
            &Query {
                year_range: Some(YearRange::new(2020, 2021)),
                ..Query::default()
            },
        );
        assert_eq!(out.warnings, vec![Warning::NoYearData]);
        assert_eq!(out.summary.filtered_papers, 2);
        assert_eq!(out.summary.year_range, None);
        assert!(out.yearly_counts.is_empty());
        assert!(out.schema.has_publish_time);
        assert!(!out.schema.has_abstract);
    }

    #[test]
    fn empty_store_is_not_an_error() {
        let s = store(&[]);
        let out = run(&s, &Query::default());
        assert_eq!(out.warnings, vec![Warning::NoYearData, Warning::EmptyResult]);
        assert!(out.top_words.is_empty());
        assert_eq!(out.summary.avg_title_length, None);
    }

    #[test]
    fn sample_and_table_are_bounded() {
        let rows: Vec<(String, Option<String>)> = (0..300)
            .map(|i| (format!("paper number {i}"), Some(format!("{}-05-01", 2000 + i % 20))))
            .collect();
        let borrowed: Vec<(&str, &str, Option<&str>)> = rows
            .iter()
            .map(|(t, d)| (t.as_str(), "J", d.as_deref()))
            .collect();
        let s = store(&borrowed);
        let query = Query {
            sample_size: 50,
            ..Query::default()
        };
        let first = run(&s, &query);
        assert_eq!(first.summary.filtered_papers, 300);
        assert_eq!(first.summary.display_papers, 50);
        assert_eq!(first.sample_rows.len(), TABLE_ROWS);
        assert!(first.sample_rows.iter().all(|r| r.abstract_text.is_none()));
        assert_eq!(first.yearly_counts.iter().map(|(_, n)| n).sum::<usize>(), 50);

        assert_eq!(run(&s, &query), first);
    }
}
