use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataLoadError;
use super::loader::load_file;
use super::model::RecordStore;

/// Identity of a source file on disk. A change in any field starts a new cache epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceFingerprint {
    pub fn of(path: &Path) -> Result<Self, DataLoadError> {
        let meta = fs::metadata(path).map_err(|e| DataLoadError::io(path, e))?;
        Ok(SourceFingerprint {
            path: path.to_path_buf(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Holds the one published [`RecordStore`] and the fingerprint it was built from.
///
/// The store is shared as `Arc` and never mutated. It is replaced only when the
/// requested source differs from the cached fingerprint, or on [`StoreCache::reload`].
/// A failed load leaves the previously published store in place.
#[derive(Debug, Default)]
pub struct StoreCache {
    entry: Option<(SourceFingerprint, Arc<RecordStore>)>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached store for `path`, loading it if the file changed.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<RecordStore>, DataLoadError> {
        let fingerprint = SourceFingerprint::of(path)?;
        if let Some((cached, store)) = &self.entry {
            if *cached == fingerprint {
                log::debug!("Store cache hit for {}", path.display());
                return Ok(Arc::clone(store));
            }
        }
        log::debug!("Store cache miss for {}", path.display());
        self.load(path, fingerprint)
    }

    /// Discard the cached epoch for `path` and load it again.
    pub fn reload(&mut self, path: &Path) -> Result<Arc<RecordStore>, DataLoadError> {
        let fingerprint = SourceFingerprint::of(path)?;
        self.load(path, fingerprint)
    }

    /// The currently published store, if any.
    pub fn current(&self) -> Option<Arc<RecordStore>> {
        self.entry.as_ref().map(|(_, store)| Arc::clone(store))
    }

    pub fn fingerprint(&self) -> Option<&SourceFingerprint> {
        self.entry.as_ref().map(|(fp, _)| fp)
    }

    /// Drop the published store.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    fn load(
        &mut self,
        path: &Path,
        fingerprint: SourceFingerprint,
    ) -> Result<Arc<RecordStore>, DataLoadError> {
        let store = Arc::new(load_file(path)?);
        self.entry = Some((fingerprint, Arc::clone(&store)));
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(file: &mut tempfile::NamedTempFile, body: &str) {
        file.as_file_mut().set_len(0).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
    }

    fn temp_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write_csv(&mut file, body);
        file
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let file = temp_csv("title\nA\nB\n");
        let mut cache = StoreCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn changed_file_starts_new_epoch() {
        let mut file = temp_csv("title\nA\n");
        let mut cache = StoreCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        assert_eq!(first.len(), 1);

        std::io::Seek::rewind(file.as_file_mut()).unwrap();
        write_csv(&mut file, "title\nA\nB\nC\n");
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_store() {
        let file = temp_csv("title\nA\n");
        let mut cache = StoreCache::new();
        cache.get_or_load(file.path()).unwrap();

        let err = cache.get_or_load(Path::new("/no/such/metadata.csv"));
        assert!(matches!(err, Err(DataLoadError::Io { .. })));
        assert_eq!(cache.current().map(|s| s.len()), Some(1));
        assert_eq!(cache.fingerprint().map(|f| f.path.as_path()), Some(file.path()));
    }

    #[test]
    fn reload_always_rebuilds() {
        let file = temp_csv("title\nA\n");
        let mut cache = StoreCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.reload(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        cache.invalidate();
        assert!(cache.current().is_none());
    }
}
