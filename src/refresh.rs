//! Periodic refresh scheduler.
//!
//! Runs the full pipeline on a fixed interval: acquire a document through the
//! snapshot store's fallback chain, analyze it, and hand both to a callback.
//! A refresh never fails outright; the store guarantees a document and the
//! analysis is total.

use std::thread;
use std::time::Duration;

use crate::analyze::{analyze, Analysis};
use crate::model::Document;
use crate::store::SnapshotStore;

/// Default time between refresh cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Drives repeated scrape-and-analyze cycles.
pub struct Refresher {
    store: SnapshotStore,
    interval: Duration,
}

impl Refresher {
    /// Create a refresher with the default five-minute interval.
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the refresh interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The underlying store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run one cycle: acquire a document and analyze it.
    pub fn cycle(&self) -> (Document, Analysis) {
        let doc = self.store.fetch_or_load();
        let analysis = analyze(&doc);
        log::info!(
            "refresh cycle: {} financial entries, {} topics",
            analysis.financial.len(),
            analysis.topics.len()
        );
        (doc, analysis)
    }

    /// Run cycles until the callback returns `false`.
    ///
    /// The first cycle runs immediately; subsequent cycles are spaced by the
    /// configured interval.
    pub fn run<F>(&self, mut callback: F)
    where
        F: FnMut(&Document, &Analysis) -> bool,
    {
        loop {
            let (doc, analysis) = self.cycle();
            if !callback(&doc, &analysis) {
                return;
            }
            thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn offline_refresher(dir: &TempDir) -> Refresher {
        let store = SnapshotStore::new()
            .with_path(dir.path().join("snapshot.json"))
            .with_url("http://127.0.0.1:1/");
        Refresher::new(store).with_interval(Duration::from_millis(10))
    }

    #[test]
    fn test_interval_configuration() {
        let dir = TempDir::new().unwrap();
        let refresher = offline_refresher(&dir);
        assert_eq!(refresher.interval(), Duration::from_millis(10));

        let store = SnapshotStore::new().with_path(dir.path().join("s.json"));
        assert_eq!(Refresher::new(store).interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_cycle_produces_document_and_analysis() {
        let dir = TempDir::new().unwrap();
        let (doc, analysis) = offline_refresher(&dir).cycle();

        // Offline with no snapshot, the cycle lands on the sample data.
        assert_eq!(doc.title, "Voorjaarsnota 2024 Dashboard");
        assert!(!analysis.financial.is_empty());
        assert!(!analysis.topics.is_empty());
    }

    #[test]
    fn test_cycles_are_consistent() {
        let dir = TempDir::new().unwrap();
        let refresher = offline_refresher(&dir);
        assert_eq!(refresher.cycle().1.financial, refresher.cycle().1.financial);
    }

    #[test]
    fn test_run_stops_when_callback_declines() {
        let dir = TempDir::new().unwrap();
        let refresher = offline_refresher(&dir);

        let mut cycles = 0;
        refresher.run(|_, analysis| {
            assert!(!analysis.financial.is_empty());
            cycles += 1;
            cycles < 3
        });
        assert_eq!(cycles, 3);
    }
}
