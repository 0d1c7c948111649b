//! Memoizing data manager for the dashboard.
//!
//! Wraps [`load_data`] so the CSV exports are read at most once per set of
//! source folders. Callers use [`DataManager::get_data`] on every frame; only
//! the first call touches the filesystem.

use std::time::{Duration, Instant};

use grind_core::error::Result;
use grind_core::models::{DailyTable, SourceFolders};
use grind_data::pipeline::load_data;

// ── DataManager ───────────────────────────────────────────────────────────────

/// Compute-once wrapper around the ingestion pipeline.
///
/// # Example
/// ```no_run
/// use grind_core::models::SourceFolders;
/// use grind_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new(SourceFolders::default());
/// if let Ok(table) = mgr.get_data() {
///     println!("rows: {}", table.len());
/// }
/// ```
pub struct DataManager {
    /// Folders the table is loaded from.
    sources: SourceFolders,
    /// The loaded table, once a load has succeeded.
    cache: Option<DailyTable>,
    /// When the cache was populated.
    cache_timestamp: Option<Instant>,
    /// Number of times the pipeline has actually run.
    load_count: u32,
    /// Human-readable description of the last load error.
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(sources: SourceFolders) -> Self {
        Self {
            sources,
            cache: None,
            cache_timestamp: None,
            load_count: 0,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the merged table, loading it on first use.
    ///
    /// A failed load leaves the cache empty, so the next call retries.
    pub fn get_data(&mut self) -> Result<&DailyTable> {
        let table = match self.cache.take() {
            Some(table) => {
                tracing::trace!("returning cached daily table");
                table
            }
            None => self.fetch()?,
        };
        Ok(&*self.cache.insert(table))
    }

    /// Point the manager at new folders.
    ///
    /// The cache survives when the folders are unchanged.
    pub fn set_sources(&mut self, sources: SourceFolders) {
        if sources == self.sources {
            return;
        }
        tracing::debug!(
            folder1 = %sources.folder1.display(),
            folder2 = %sources.folder2.display(),
            "source folders changed"
        );
        self.sources = sources;
        self.invalidate_cache();
    }

    /// Discard the current cache, forcing the next [`get_data`](Self::get_data)
    /// call to reload.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if nothing is loaded.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    /// How many times the pipeline has run.
    pub fn load_count(&self) -> u32 {
        self.load_count
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn sources(&self) -> &SourceFolders {
        &self.sources
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn fetch(&mut self) -> Result<DailyTable> {
        self.load_count += 1;
        match load_data(&self.sources) {
            Ok(table) => {
                tracing::debug!(
                    rows = table.len(),
                    load_count = self.load_count,
                    "daily table cached"
                );
                self.cache_timestamp = Some(Instant::now());
                self.last_error = None;
                Ok(table)
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use grind_core::models::{ACTIVITY_FILE_NAME, SLEEP_FILE_NAME};
    use std::path::Path;
    use tempfile::TempDir;

    const ACTIVITY_CSV: &str = "Id,ActivityDate,TotalSteps,TotalDistance,VeryActiveMinutes,\
FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories
1,3/13/2016,1000,0.7,0,0,60,1200,1500
";

    const SLEEP_CSV: &str = "Id,date,value,logId
1,3/13/2016 2:00:00 AM,1,11114919637
";

    fn write_period(dir: &Path, with_sleep: bool) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(ACTIVITY_FILE_NAME), ACTIVITY_CSV).unwrap();
        if with_sleep {
            std::fs::write(dir.join(SLEEP_FILE_NAME), SLEEP_CSV).unwrap();
        }
    }

    /// Returns a DataManager + TempDir. The TempDir must outlive the test.
    fn make_manager_with_dir() -> (DataManager, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let sources = SourceFolders::new(dir.path().join("p1"), dir.path().join("p2"));
        write_period(&sources.folder1, true);
        write_period(&sources.folder2, true);
        (DataManager::new(sources), dir)
    }

    #[test]
    fn test_nothing_loaded_before_first_call() {
        let (mgr, _dir) = make_manager_with_dir();
        assert!(mgr.cache_age().is_none());
        assert!(mgr.last_error().is_none());
        assert_eq!(mgr.load_count(), 0);
    }

    #[test]
    fn test_loads_once_and_reuses_result() {
        let (mut mgr, dir) = make_manager_with_dir();

        let rows = mgr.get_data().unwrap().len();
        assert_eq!(rows, 2);
        assert_eq!(mgr.load_count(), 1);

        // With the files gone, only the cache can answer.
        std::fs::remove_dir_all(dir.path().join("p1")).unwrap();
        let again = mgr.get_data().unwrap();
        assert_eq!(again.len(), rows);
        assert_eq!(mgr.load_count(), 1);
        assert!(mgr.cache_age().expect("age after load") < Duration::from_secs(5));
    }

    #[test]
    fn test_invalidate_cache_forces_reload() {
        let (mut mgr, _dir) = make_manager_with_dir();
        mgr.get_data().unwrap();
        mgr.invalidate_cache();
        assert!(mgr.cache_age().is_none());

        mgr.get_data().unwrap();
        assert_eq!(mgr.load_count(), 2);
    }

    #[test]
    fn test_set_sources_same_folders_keeps_cache() {
        let (mut mgr, _dir) = make_manager_with_dir();
        mgr.get_data().unwrap();

        let same = mgr.sources().clone();
        mgr.set_sources(same);
        mgr.get_data().unwrap();
        assert_eq!(mgr.load_count(), 1);
    }

    #[test]
    fn test_set_sources_new_folders_reloads() {
        let (mut mgr, dir) = make_manager_with_dir();
        assert!(mgr.get_data().unwrap().has_sleep_column());

        let other = SourceFolders::new(dir.path().join("q1"), dir.path().join("q2"));
        write_period(&other.folder1, false);
        write_period(&other.folder2, false);
        mgr.set_sources(other);

        let table = mgr.get_data().unwrap();
        assert!(!table.has_sleep_column());
        assert_eq!(mgr.load_count(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let sources = SourceFolders::new(dir.path().join("p1"), dir.path().join("p2"));
        let mut mgr = DataManager::new(sources.clone());

        let err = mgr.get_data().unwrap_err();
        assert!(err.is_missing_file());
        assert!(mgr.last_error().unwrap().contains(ACTIVITY_FILE_NAME));
        assert!(mgr.cache_age().is_none());

        write_period(&sources.folder1, true);
        write_period(&sources.folder2, true);
        assert_eq!(mgr.get_data().unwrap().len(), 2);
        assert_eq!(mgr.load_count(), 2);
        assert!(mgr.last_error().is_none());
    }
}
