use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ExplorerConfig;
use crate::data::cache::StoreCache;
use crate::data::error::DataLoadError;
use crate::data::filter::{default_year_selection, filter_store};
use crate::data::model::{RecordStore, YearRange};
use crate::pipeline::{self, Output, Query};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Owner of the published record store.
    cache: StoreCache,

    /// File the current store was loaded from.
    pub source_path: Option<PathBuf>,

    /// Published store (None until a file loads successfully).
    pub store: Option<Arc<RecordStore>>,

    /// Year slider selection; `None` when the store has no year data.
    pub year_selection: Option<YearRange>,

    /// Sample slider value.
    pub sample_size: usize,

    /// Pipeline result for the current parameters (cached until they change).
    pub output: Option<Output>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            sample_size: config.default_sample_size,
            config,
            cache: StoreCache::new(),
            source_path: None,
            store: None,
            year_selection: None,
            output: None,
            status_message: None,
        }
    }

    /// Load `path` through the cache and publish it. Errors are reported in
    /// `status_message`; the previous store stays on screen.
    pub fn open(&mut self, path: &Path) {
        let result = self.cache.get_or_load(path);
        self.publish(path, result);
    }

    /// Force a fresh load of the current source.
    pub fn reload(&mut self) {
        let Some(path) = self.source_path.clone() else {
            return;
        };
        let result = self.cache.reload(&path);
        self.publish(&path, result);
    }

    fn publish(
        &mut self,
        path: &Path,
        result: Result<Arc<RecordStore>, DataLoadError>,
    ) {
        match result {
            Ok(store) => self.set_store(path, store),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly published store and reset the sliders to their defaults.
    pub fn set_store(&mut self, path: &Path, store: Arc<RecordStore>) {
        self.year_selection = store
            .year_extent()
            .map(|extent| default_year_selection(extent, self.config.default_year_floor));
        let available = filter_store(&store, self.year_selection).records().len();
        self.sample_size = self.config.initial_sample_size(available);

        self.source_path = Some(path.to_path_buf());
        self.store = Some(store);
        self.status_message = None;
        self.rerun();
    }

    /// Move the year slider.
    pub fn set_year_selection(&mut self, range: YearRange) {
        if self.year_selection == Some(range) {
            return;
        }
        self.year_selection = Some(range);
        self.rerun();
    }

    /// Move the sample-size slider. The value snaps to the nearest slider
    /// stop; the pipeline re-runs only when the snapped size changes.
    pub fn set_sample_size(&mut self, size: usize) {
        let size = self.config.snap_sample_size(size, self.filtered_count());
        if self.sample_size == size {
            return;
        }
        self.sample_size = size;
        self.rerun();
    }

    /// Papers passing the current year selection.
    pub fn filtered_count(&self) -> usize {
        self.output
            .as_ref()
            .map_or(0, |out| out.summary.filtered_papers)
    }

    /// Upper bound for the sample slider under the current filter.
    pub fn sample_slider_max(&self) -> usize {
        self.config.sample_slider_max(self.filtered_count())
    }

    pub fn query(&self) -> Query {
        Query {
            year_range: self.year_selection,
            sample_size: self.sample_size,
            seed: self.config.seed,
            top_journals: self.config.top_journals,
            top_words: self.config.top_words,
            table_rows: self.config.table_rows,
        }
    }

    /// Recompute `output` after a parameter change.
    fn rerun(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let available = filter_store(&store, self.year_selection).records().len();
        self.sample_size = self.config.snap_sample_size(self.sample_size, available);

        self.output = Some(pipeline::run(&store, &self.query()));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn csv_file(rows: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "title,journal,publish_time").unwrap();
        for i in 0..rows {
            writeln!(file, "Paper {i},Journal {},{}-01-15", i % 3, 2015 + i % 8).unwrap();
        }
        file
    }

    #[test]
    fn open_sets_default_selection_and_runs_pipeline() {
        let file = csv_file(2_400);
        let mut state = AppState::new(ExplorerConfig::default());
        state.open(file.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.year_selection, Some(YearRange::new(2019, 2022)));
        let out = state.output.as_ref().unwrap();
        assert_eq!(out.summary.total_papers, 2_400);
        assert_eq!(out.summary.filtered_papers, 1_200);
        assert_eq!(state.sample_size, 1_200);
        assert_eq!(out.summary.display_papers, 1_200);
    }

    #[test]
    fn slider_changes_rerun_and_clamp_sample_size() {
        let file = csv_file(16_000);
        let mut state = AppState::new(ExplorerConfig::default());
        state.open(file.path());
        assert_eq!(state.sample_size, 5_000);

        state.set_sample_size(8_000);
        assert_eq!(state.output.as_ref().unwrap().summary.display_papers, 8_000);

        state.set_year_selection(YearRange::new(2015, 2015));
        assert_eq!(state.filtered_count(), 2_000);
        assert_eq!(state.sample_size, 2_000);
        assert_eq!(state.sample_slider_max(), 2_000);
    }

    #[test]
    fn sample_size_snaps_to_off_grid_max() {
        let file = csv_file(3_200);
        let mut state = AppState::new(ExplorerConfig::default());
        state.open(file.path());
        assert_eq!(state.filtered_count(), 1_600);
        assert_eq!(state.sample_size, 1_600);

        state.set_sample_size(1_200);
        assert_eq!(state.sample_size, 1_000);
        assert_eq!(state.output.as_ref().unwrap().summary.display_papers, 1_000);

        state.set_sample_size(1_450);
        assert_eq!(state.sample_size, 1_600);
        state.set_sample_size(2_000);
        assert_eq!(state.sample_size, 1_600);
    }

    #[test]
    fn failed_open_keeps_previous_store() {
        let file = csv_file(10);
        let mut state = AppState::new(ExplorerConfig::default());
        state.open(file.path());
        state.open(Path::new("/missing/metadata.csv"));

        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
        assert_eq!(state.store.as_ref().map(|s| s.len()), Some(10));
        assert_eq!(state.source_path.as_deref(), Some(file.path()));
    }
}
