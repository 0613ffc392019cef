//! Snapshot store: fetches the report page, persists structured snapshots,
//! and provides the fallback chain that keeps the pipeline supplied with a
//! document under any failure.

mod sample;

pub use sample::sample_document;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Document;
use crate::parser::DocumentExtractor;

/// Archived report page scraped by default.
pub const DEFAULT_URL: &str = "https://abx10.archiefweb.eu:8443/watdoetdegemeentevoorjaarsnota2024/20241114091054mp_/https://archieven.watdoetdegemeente.rotterdam.nl/voorjaarsnota2024/hoofdlijnen/01-voortgang/";

/// Snapshot path, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/scraped_data.json";

/// Browser-like user agent; the archive endpoint serves bots a stub page.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Owns the source URL and the snapshot file.
pub struct SnapshotStore {
    url: String,
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store with the default URL and snapshot path.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }

    /// Set the source URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the snapshot file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Load the persisted snapshot; `Ok(None)` when none exists.
    pub fn load(&self) -> Result<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Persist a document as pretty-printed UTF-8 JSON, creating the parent
    /// directory on demand. Non-ASCII text is written as-is.
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }

    /// Fetch the page with a single GET (no retries, error on non-2xx),
    /// extract it, and persist the result for future fallback.
    pub fn fetch(&self) -> Result<Document> {
        log::info!("fetching {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        let body = client.get(&self.url).send()?.error_for_status()?.text()?;

        let doc = DocumentExtractor::new().extract(&body);
        self.save(&doc)?;
        Ok(doc)
    }

    /// Return a document unconditionally: cached snapshot if present,
    /// otherwise a fresh fetch, otherwise the built-in sample data.
    ///
    /// An existing snapshot is reused without a freshness check; the refresh
    /// interval lives in the scheduler, not here.
    pub fn fetch_or_load(&self) -> Document {
        match self.load() {
            Ok(Some(doc)) => {
                log::info!("using cached snapshot from {}", self.path.display());
                return doc;
            }
            Ok(None) => {}
            Err(err) => log::warn!("snapshot unreadable: {err}"),
        }

        match self.fetch() {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!("fetch failed: {err}");
                match self.load() {
                    Ok(Some(doc)) => doc,
                    _ => {
                        log::warn!("no usable snapshot, falling back to sample data");
                        sample_document()
                    }
                }
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
