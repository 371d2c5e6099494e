use super::model::{PaperRecord, RecordStore, YearRange};

// ---------------------------------------------------------------------------
// Year filter
// ---------------------------------------------------------------------------

/// Outcome of filtering a store by publication year.
#[derive(Debug, Clone)]
pub enum YearFilter<'a> {
    /// No record in the store has a year; the view is the whole store.
    NoYearData(Vec<&'a PaperRecord>),
    /// Records whose year lies in the applied (clamped) range.
    Applied {
        range: YearRange,
        records: Vec<&'a PaperRecord>,
    },
}

impl<'a> YearFilter<'a> {
    pub fn records(&self) -> &[&'a PaperRecord] {
        match self {
            YearFilter::NoYearData(records) | YearFilter::Applied { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<&'a PaperRecord> {
        match self {
            YearFilter::NoYearData(records) | YearFilter::Applied { records, .. } => records,
        }
    }

    /// The range that was applied, if year data exists.
    pub fn range(&self) -> Option<YearRange> {
        match self {
            YearFilter::NoYearData(_) => None,
            YearFilter::Applied { range, .. } => Some(*range),
        }
    }
}

/// Keep records with a defined year inside `range`, preserving order.
/// Records with an undefined year never pass.
pub fn filter_by_year<'a, I>(records: I, range: YearRange) -> Vec<&'a PaperRecord>
where
    I: IntoIterator<Item = &'a PaperRecord>,
{
    records
        .into_iter()
        .filter(|r| r.publish_year().is_some_and(|y| range.contains(y)))
        .collect()
}

/// Filter the store by an optional year range.
///
/// * No year data in the store → identity, reported as [`YearFilter::NoYearData`].
/// * `range` is `None` → the store's full extent is applied, which drops undated records.
/// * Otherwise `range` is clamped to the extent and applied.
pub fn filter_store(store: &RecordStore, range: Option<YearRange>) -> YearFilter<'_> {
    let Some(extent) = store.year_extent() else {
        return YearFilter::NoYearData(store.records().iter().collect());
    };
    let range = range.map_or(extent, |r| r.clamp_to(extent));
    YearFilter::Applied {
        range,
        records: filter_by_year(store.records(), range),
    }
}

/// Initial slider selection: from `floor` (or the first year, if later) to the last year.
pub fn default_year_selection(extent: YearRange, floor: i32) -> YearRange {
    YearRange::new(floor.clamp(extent.min, extent.max), extent.max)
}
