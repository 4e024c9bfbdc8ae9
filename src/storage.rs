use crate::models::HistoryEntry;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

const MAX_HISTORY: usize = 50;
const STORE_FILE: &str = "storage.json";

/// Persistent key-value store plus in-memory request history
pub struct Storage {
    pub history: VecDeque<HistoryEntry>,
    values: Map<String, Value>,
    path: Option<PathBuf>,
}

impl Storage {
    /// Open the store in `data_dir`, starting empty if the file is missing or unreadable
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(STORE_FILE);
        let values = match Self::read_file(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Starting with empty storage");
                Map::new()
            }
        };

        Storage {
            history: VecDeque::with_capacity(MAX_HISTORY),
            values,
            path: Some(path),
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Storage {
            history: VecDeque::with_capacity(MAX_HISTORY),
            values: Map::new(),
            path: None,
        }
    }

    fn read_file(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(path)?;
        let values = serde_json::from_str(&content)
            .with_context(|| format!("Malformed store file {}", path.display()))?;
        Ok(values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        self.values.insert(key.into(), value);
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Rewrite the store file through a temp file so a crash never leaves it half-written
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Add entry to history
    pub fn add_to_history(&mut self, entry: HistoryEntry) {
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_back();
        }
        self.history.push_front(entry);
    }

    /// Get history item by index (0 = most recent)
    pub fn get_history(&self, index: usize) -> Option<&HistoryEntry> {
        self.history.get(index)
    }

    /// History length
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, RequestSnapshot, ResponseRecord, ResponseBody};
    use serde_json::json;
    use tempfile::tempdir;

    fn entry(slug: &str) -> HistoryEntry {
        HistoryEntry {
            slug: slug.to_string(),
            record: ResponseRecord {
                url: "http://x".to_string(),
                timing_ms: 1,
                outcome: Outcome::Completed {
                    status: 200,
                    status_text: "OK".to_string(),
                    headers: Vec::new(),
                    body: ResponseBody::Text(String::new()),
                    body_size: 0,
                },
                request: RequestSnapshot::default(),
            },
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut storage = Storage::open(dir.path());
            storage.set("userToken", json!("abc")).unwrap();
            storage.set("auth", json!({"authHash": "h"})).unwrap();
        }
        let storage = Storage::open(dir.path());
        assert_eq!(storage.get_str("userToken"), Some("abc"));
        assert_eq!(storage.get("auth").unwrap()["authHash"], "h");
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let mut storage = Storage::open(dir.path());
        storage.set("userToken", json!("abc")).unwrap();
        storage.remove("userToken").unwrap();
        assert!(Storage::open(dir.path()).get("userToken").is_none());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "not json").unwrap();
        let storage = Storage::open(dir.path());
        assert!(storage.get("userToken").is_none());
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let mut storage = Storage::in_memory();
        for i in 0..(MAX_HISTORY + 5) {
            storage.add_to_history(entry(&format!("e{}", i)));
        }
        assert_eq!(storage.history_len(), MAX_HISTORY);
        assert_eq!(storage.get_history(0).unwrap().slug, format!("e{}", MAX_HISTORY + 4));
    }
}
