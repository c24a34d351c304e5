// crates/client/src/history.rs
//! Durable storage for the search-history list.
//!
//! On disk this is a JSON array of strings under one fixed namespace key.
//! History is a convenience feature: every failure path degrades to "empty"
//! or "not persisted this session". Loading never fails on corrupt data and
//! saving never surfaces an error to the caller.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Namespace key for persisted search history. On disk this becomes
/// `<dir>/inboxhq.search.history.json`.
pub const HISTORY_STORAGE_KEY: &str = "inboxhq.search.history";

/// Storage backend for the search-history list.
///
/// Injected into [`crate::SearchStore`] so tests can swap the file-backed
/// store for an in-memory fake.
pub trait HistoryStore: Send {
    /// Load the persisted list. Any parse or read failure maps to empty.
    fn load(&self) -> Vec<String>;

    /// Persist the list, best-effort. Failures are logged and swallowed.
    fn save(&self, entries: &[String]);
}

/// File-backed history store writing a single JSON string array.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Store history under `dir`, using the fixed namespace key as filename.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{HISTORY_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Vec<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        parse_history(&raw)
    }

    fn save(&self, entries: &[String]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize search history");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist search history");
        }
    }
}

/// Parse persisted history: corrupt JSON or a non-array value yields empty,
/// and non-string entries are dropped.
fn parse_history(raw: &str) -> Vec<String> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// In-memory history store for tests and non-persistent sessions.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<String>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn save(&self, entries: &[String]) {
        if let Ok(mut guard) = self.entries.lock() {
            *guard = entries.to_vec();
        }
    }
}
