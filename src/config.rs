use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::aggregate::{TOP_JOURNALS, TOP_WORDS};
use crate::data::sample::DEFAULT_SEED;
use crate::pipeline::TABLE_ROWS;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "paper-explorer.json";
/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "PAPER_EXPLORER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid sample size bounds: min {min}, max {max}, step {step}")]
    SampleBounds { min: usize, max: usize, step: usize },
}

/// Explorer settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Metadata file opened at start-up.
    pub data_path: PathBuf,
    /// Seed for the display sample.
    pub seed: u64,
    pub default_sample_size: usize,
    pub sample_size_min: usize,
    pub sample_size_max: usize,
    pub sample_size_step: usize,
    /// Initial lower bound of the year slider, when the data reaches that far.
    pub default_year_floor: i32,
    pub top_journals: usize,
    pub top_words: usize,
    pub table_rows: usize,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            data_path: PathBuf::from("metadata.csv"),
            seed: DEFAULT_SEED,
            default_sample_size: 5_000,
            sample_size_min: 1_000,
            sample_size_max: 10_000,
            sample_size_step: 1_000,
            default_year_floor: 2019,
            top_journals: TOP_JOURNALS,
            top_words: TOP_WORDS,
            table_rows: TABLE_ROWS,
            window_size: [1200.0, 800.0],
        }
    }
}

impl ExplorerConfig {
    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExplorerConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for this process.
    ///
    /// Order: `$PAPER_EXPLORER_CONFIG`, then `./paper-explorer.json`, then
    /// defaults. A broken file is logged and ignored. `data_override`
    /// (the first CLI argument) replaces `data_path`.
    pub fn resolve(env_path: Option<PathBuf>, data_override: Option<PathBuf>) -> Self {
        let explicit = env_path.is_some();
        let path = env_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        let mut config = if explicit || path.exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Using config {}", path.display());
                    config
                }
                Err(e) => {
                    log::error!("{e:#}; falling back to defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if let Some(data_path) = data_override {
            config.data_path = data_path;
        }
        config
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let bad = self.sample_size_step == 0
            || self.sample_size_min == 0
            || self.sample_size_min > self.sample_size_max;
        if bad {
            return Err(ConfigError::SampleBounds {
                min: self.sample_size_min,
                max: self.sample_size_max,
                step: self.sample_size_step,
            });
        }
        Ok(())
    }

    /// Upper bound of the sample slider for `available` filtered papers.
    pub fn sample_slider_max(&self, available: usize) -> usize {
        self.sample_size_max.min(available).max(self.sample_size_min)
    }

    /// Initial sample size for `available` filtered papers.
    pub fn initial_sample_size(&self, available: usize) -> usize {
        self.snap_sample_size(self.default_sample_size, available)
    }

    /// Nearest sample-slider stop to `size`. The stops are
    /// `min + k * step` inside the slider range, plus the slider max itself.
    pub fn snap_sample_size(&self, size: usize, available: usize) -> usize {
        let min = self.sample_size_min;
        let max = self.sample_slider_max(available);
        if size <= min {
            return min;
        }
        if size >= max {
            return max;
        }
        let step = self.sample_size_step.max(1);
        let lower = min + (size - min) / step * step;
        let upper = (lower + step).min(max);
        if size - lower >= upper - size {
            upper
        } else {
            lower
        }
    }

    /// Whether the slider max lies on the `min + k * step` grid.
    pub fn slider_max_on_grid(&self, available: usize) -> bool {
        let step = self.sample_size_step.max(1);
        (self.sample_slider_max(available) - self.sample_size_min) % step == 0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = config_file(r#"{ "seed": 7, "data_path": "papers.parquet" }"#);
        let config = ExplorerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.data_path, PathBuf::from("papers.parquet"));
        assert_eq!(config.top_words, 15);
        assert_eq!(config.sample_size_min, 1_000);
    }

    #[test]
    fn unknown_keys_and_bad_bounds_are_rejected() {
        let typo = config_file(r#"{ "sead": 7 }"#);
        assert!(matches!(
            ExplorerConfig::from_file(typo.path()),
            Err(ConfigError::Parse { .. })
        ));

        let bounds = config_file(r#"{ "sample_size_min": 5000, "sample_size_max": 10 }"#);
        assert!(matches!(
            ExplorerConfig::from_file(bounds.path()),
            Err(ConfigError::SampleBounds { .. })
        ));
    }

    #[test]
    fn broken_explicit_config_falls_back_to_defaults() {
        let file = config_file("not json");
        let config = ExplorerConfig::resolve(
            Some(file.path().to_path_buf()),
            Some(PathBuf::from("other.csv")),
        );
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn sample_slider_tracks_available_papers() {
        let config = ExplorerConfig::default();
        assert_eq!(config.sample_slider_max(50_000), 10_000);
        assert_eq!(config.sample_slider_max(3_000), 3_000);
        assert_eq!(config.sample_slider_max(10), 1_000);
        assert_eq!(config.initial_sample_size(50_000), 5_000);
        assert_eq!(config.initial_sample_size(3_000), 3_000);
        assert_eq!(config.initial_sample_size(1_200), 1_200);
    }

    #[test]
    fn sample_sizes_snap_to_slider_stops() {
        let config = ExplorerConfig::default();
        assert_eq!(config.snap_sample_size(4_400, 50_000), 4_000);
        assert_eq!(config.snap_sample_size(4_500, 50_000), 5_000);
        assert_eq!(config.snap_sample_size(20_000, 50_000), 10_000);
        assert_eq!(config.snap_sample_size(10, 50_000), 1_000);

        // Off-grid max is a stop of its own.
        assert_eq!(config.snap_sample_size(1_200, 1_200), 1_200);
        assert_eq!(config.snap_sample_size(1_400, 1_600), 1_600);
        assert_eq!(config.snap_sample_size(1_200, 1_600), 1_000);
        assert_eq!(config.snap_sample_size(2_000, 1_600), 1_600);

        assert!(config.slider_max_on_grid(3_000));
        assert!(!config.slider_max_on_grid(1_600));
    }
}
