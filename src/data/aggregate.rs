//! Read-only aggregations over a record view.
//!
//! Every function accepts anything that iterates `&PaperRecord`, so a store
//! slice, a filtered view and a sample all work the same way. Empty input
//! always yields empty output.

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;

use super::model::{PaperRecord, YearRange};

/// Number of journals shown in the top-journals chart.
pub const TOP_JOURNALS: usize = 10;
/// Number of words shown in the title-words chart.
pub const TOP_WORDS: usize = 15;

/// Common words excluded from title word counts.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "of", "a", "an", "in", "on", "at", "to", "for", "with", "by", "from", "as",
    "is", "are", "was", "were",
];

/// Characters replaced by spaces before splitting a title.
const SPLIT_MARKS: &[char] = &[',', '.', ':'];
/// Characters trimmed from both ends of every token.
const TRIM_MARKS: &[char] = &['.', ',', '!', '?', ':', ';', '(', ')', '[', ']', '{', '}'];

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count occurrences, remembering the order each key was first seen.
fn count_first_seen<K, I>(keys: I) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Highest counts first; the stable sort keeps first-seen order among ties.
fn top_k<K>(counts: IndexMap<K, usize>, k: usize) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(k);
    ranked
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

/// Papers per publication year, ascending by year. Undated records are skipped.
pub fn yearly_counts<'a, I>(records: I) -> Vec<(i32, usize)>
where
    I: IntoIterator<Item = &'a PaperRecord>,
{
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.into_iter().filter_map(PaperRecord::publish_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// The `k` journals with the most papers.
pub fn top_journals<'a, I>(records: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a PaperRecord>,
{
    let counts = count_first_seen(records.into_iter().map(PaperRecord::journal));
    top_k(counts, k)
        .into_iter()
        .map(|(journal, n)| (journal.to_string(), n))
        .collect()
}

/// The `k` most frequent title words after stopword removal.
pub fn top_title_words<'a, I>(records: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a PaperRecord>,
{
    let counts = count_first_seen(
        records
            .into_iter()
            .flat_map(|r| title_tokens(r.title())),
    );
    top_k(counts, k)
}

/// Split a title into countable words.
///
/// Lower-cases, turns `, . :` into spaces, splits on whitespace, trims
/// punctuation from token ends, then drops tokens of two characters or
/// fewer and stopwords. The checks see the trimmed token, so `(the)` is a
/// stopword and `19)` is too short.
pub fn title_tokens(title: &str) -> Vec<String> {
    let lowered = title.to_lowercase().replace(SPLIT_MARKS, " ");
    lowered
        .split_whitespace()
        .map(|word| word.trim_matches(TRIM_MARKS))
        .filter(|word| word.chars().count() > 2 && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline numbers for the overview and quick-stats panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_papers: usize,
    pub filtered_papers: usize,
    pub display_papers: usize,
    pub year_range: Option<YearRange>,
    pub unique_journals: usize,
    /// Mean title length in characters; `None` for an empty display set.
    pub avg_title_length: Option<f64>,
    /// Mean abstract length in words; `None` for an empty display set.
    pub avg_abstract_words: Option<f64>,
}

/// Summarise the display set against the store and filter sizes.
pub fn summarize(
    total_papers: usize,
    filtered_papers: usize,
    year_range: Option<YearRange>,
    display: &[&PaperRecord],
) -> Summary {
    let mean = |f: fn(&PaperRecord) -> usize| {
        if display.is_empty() {
            None
        } else {
            let sum: usize = display.iter().map(|r| f(r)).sum();
            Some(sum as f64 / display.len() as f64)
        }
    };

    Summary {
        total_papers,
        filtered_papers,
        display_papers: display.len(),
        year_range,
        unique_journals: count_first_seen(display.iter().map(|r| r.journal())).len(),
        avg_title_length: mean(PaperRecord::title_length),
        avg_abstract_words: mean(PaperRecord::abstract_word_count),
    }
}
