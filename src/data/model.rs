use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::dates::parse_publish_time;

/// Journal name used when the source row has none.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

// ---------------------------------------------------------------------------
// SourceSchema – which optional columns the source carries
// ---------------------------------------------------------------------------

/// Column presence, resolved once when the source is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSchema {
    pub has_title: bool,
    pub has_journal: bool,
    pub has_abstract: bool,
    pub has_publish_time: bool,
}

impl SourceSchema {
    /// Resolve the schema from a list of column names.
    pub fn from_columns<'a, I>(columns: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut schema = SourceSchema::default();
        for col in columns {
            match col.trim() {
                "title" => schema.has_title = true,
                "journal" => schema.has_journal = true,
                "abstract" => schema.has_abstract = true,
                "publish_time" => schema.has_publish_time = true,
                _ => {}
            }
        }
        schema
    }
}

impl fmt::Display for SourceSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present: Vec<&str> = [
            (self.has_title, "title"),
            (self.has_journal, "journal"),
            (self.has_abstract, "abstract"),
            (self.has_publish_time, "publish_time"),
        ]
        .iter()
        .filter(|(has, _)| *has)
        .map(|(_, name)| *name)
        .collect();
        write!(f, "[{}]", present.join(", "))
    }
}

// ---------------------------------------------------------------------------
// RawPaperRow – one uncleaned row as read from the source
// ---------------------------------------------------------------------------

/// A source row before cleaning. Absent columns and null cells are both `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPaperRow {
    pub title: Option<String>,
    pub journal: Option<String>,
    pub abstract_text: Option<String>,
    pub publish_time: Option<String>,
}

// ---------------------------------------------------------------------------
// PaperRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A cleaned paper record. Derived fields are computed in [`PaperRecord::new`]
/// and the struct exposes no mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRecord {
    title: String,
    journal: String,
    abstract_text: String,
    publish_date: Option<NaiveDate>,
    publish_year: Option<i32>,
    title_length: usize,
    abstract_word_count: usize,
}

impl PaperRecord {
    /// Build a record from a title and the optional remaining fields.
    pub fn new(
        title: impl Into<String>,
        journal: Option<String>,
        abstract_text: Option<String>,
        publish_time: Option<&str>,
    ) -> Self {
        let title = title.into();
        let journal = journal.unwrap_or_else(|| UNKNOWN_JOURNAL.to_string());
        let abstract_text = abstract_text.unwrap_or_default();
        let publish_date = publish_time.and_then(parse_publish_time);

        PaperRecord {
            title_length: title.chars().count(),
            abstract_word_count: abstract_text.split_whitespace().count(),
            publish_year: publish_date.map(|d| d.year()),
            publish_date,
            title,
            journal,
            abstract_text,
        }
    }

    /// Clean a raw row. Returns `None` when the row has no title.
    pub fn from_raw(row: RawPaperRow) -> Option<Self> {
        let title = non_empty(row.title)?;
        Some(PaperRecord::new(
            title,
            non_empty(row.journal),
            non_empty(row.abstract_text),
            row.publish_time.as_deref(),
        ))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.publish_date
    }

    pub fn publish_year(&self) -> Option<i32> {
        self.publish_year
    }

    /// Title length in characters.
    pub fn title_length(&self) -> usize {
        self.title_length
    }

    /// Number of whitespace-separated tokens in the abstract.
    pub fn abstract_word_count(&self) -> usize {
        self.abstract_word_count
    }
}

/// Empty cells count as missing, matching how CSV readers surface nulls.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// YearRange – inclusive publication-year bounds
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` year interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if given in reverse.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Clamp both bounds into `extent`.
    pub fn clamp_to(&self, extent: YearRange) -> YearRange {
        YearRange::new(
            self.min.clamp(extent.min, extent.max),
            self.max.clamp(extent.min, extent.max),
        )
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned, immutable record collection.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<PaperRecord>,
    schema: SourceSchema,
    dropped_rows: usize,
    extent: Option<YearRange>,
}

impl RecordStore {
    /// Clean raw rows into a store, dropping rows without a title.
    pub fn from_rows<I>(rows: I, schema: SourceSchema) -> Self
    where
        I: IntoIterator<Item = RawPaperRow>,
    {
        let mut records = Vec::new();
        let mut dropped_rows = 0;
        for row in rows {
            match PaperRecord::from_raw(row) {
                Some(record) => records.push(record),
                None => dropped_rows += 1,
            }
        }
        Self::from_records(records, schema, dropped_rows)
    }

    /// Wrap already-cleaned records.
    pub fn from_records(records: Vec<PaperRecord>, schema: SourceSchema, dropped_rows: usize) -> Self {
        let extent = records
            .iter()
            .filter_map(PaperRecord::publish_year)
            .fold(None, |acc: Option<YearRange>, year| match acc {
                None => Some(YearRange::new(year, year)),
                Some(r) => Some(YearRange::new(r.min.min(year), r.max.max(year))),
            });
        RecordStore {
            records,
            schema,
            dropped_rows,
            extent,
        }
    }

    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    pub fn schema(&self) -> SourceSchema {
        self.schema
    }

    /// Rows discarded during cleaning because they had no title.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Smallest and largest publication year, or `None` when no record has one.
    pub fn year_extent(&self) -> Option<YearRange> {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
