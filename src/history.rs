//! Recent Searches
//!
//! Bounded, deduplicated, most-recent-first list of past searches kept in
//! client-local storage. The storage is injected so tests can use memory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::models::SearchParams;

pub const HISTORY_KEY: &str = "inventory_insights_recent_searches";
pub const HISTORY_LIMIT: usize = 10;

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Browser `localStorage` of the current origin
#[derive(Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or("no window")?
            .local_storage()
            .map_err(|_| "localStorage denied".to_string())?
            .ok_or_else(|| "localStorage unavailable".to_string())
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| "localStorage write failed".to_string())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| "localStorage write failed".to_string())
    }
}

/// In-memory store
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// One remembered search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub filter_type: String,
    pub filter_value: String,
    pub category_id: Option<u32>,
    pub min_stock: Option<u32>,
    /// Selector label, e.g. "Color: Red"
    pub label: String,
    #[serde(default)]
    pub category_label: Option<String>,
    /// Milliseconds since the epoch
    pub timestamp: f64,
}

impl RecentSearch {
    fn same_search(&self, other: &RecentSearch) -> bool {
        self.filter_type == other.filter_type
            && self.filter_value == other.filter_value
            && self.category_id == other.category_id
            && self.min_stock == other.min_stock
    }

    pub fn params(&self) -> SearchParams {
        SearchParams {
            filter_type: self.filter_type.clone(),
            filter_value: self.filter_value.clone(),
            min_stock: self.min_stock.map(i64::from),
            product_category: self.category_id.map(i64::from),
        }
    }

    /// One-line summary for dropdowns and the last-search preview
    pub fn summary(&self) -> String {
        let mut text = self.label.clone();
        if let Some(category) = self.category_id {
            match &self.category_label {
                Some(name) => text.push_str(&format!(" in {}", name.trim_start_matches(['—', ' ']))),
                None => text.push_str(&format!(" in category #{}", category)),
            }
        }
        if let Some(min) = self.min_stock {
            text.push_str(&format!(" (stock < {})", min));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    NotFound(usize),
    Storage(String),
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::NotFound(index) => write!(f, "No recent search at position {}", index),
            HistoryError::Storage(e) => write!(f, "Could not save search history: {}", e),
        }
    }
}

/// History over a key-value store
#[derive(Clone)]
pub struct SearchHistory<S> {
    store: S,
}

impl<S: KeyValueStore> SearchHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Most recent first. Unreadable data reads as empty.
    pub fn list(&self) -> Vec<RecentSearch> {
        self.store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Prepend, dropping an earlier identical search and anything past the cap
    pub fn record(&self, search: RecentSearch) -> Result<Vec<RecentSearch>, HistoryError> {
        let mut entries = self.list();
        entries.retain(|e| !e.same_search(&search));
        entries.insert(0, search);
        entries.truncate(HISTORY_LIMIT);
        self.save(&entries)?;
        Ok(entries)
    }

    pub fn load(&self, index: usize) -> Result<RecentSearch, HistoryError> {
        self.list()
            .into_iter()
            .nth(index)
            .ok_or(HistoryError::NotFound(index))
    }

    /// Caller confirms with the user first
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.store.remove(HISTORY_KEY).map_err(HistoryError::Storage)
    }

    fn save(&self, entries: &[RecentSearch]) -> Result<(), HistoryError> {
        let raw = serde_json::to_string(entries).map_err(|e| HistoryError::Storage(e.to_string()))?;
        self.store.set(HISTORY_KEY, &raw).map_err(HistoryError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(value: &str, min_stock: Option<u32>, timestamp: f64) -> RecentSearch {
        RecentSearch {
            filter_type: "tags".to_string(),
            filter_value: value.to_string(),
            category_id: None,
            min_stock,
            label: format!("Tag {}", value),
            category_label: None,
            timestamp,
        }
    }

    fn history() -> SearchHistory<MemoryStore> {
        SearchHistory::new(MemoryStore::default())
    }

    #[test]
    fn test_most_recent_first() {
        let h = history();
        h.record(search("1", None, 1.0)).unwrap();
        h.record(search("2", None, 2.0)).unwrap();

        let values: Vec<_> = h.list().into_iter().map(|e| e.filter_value).collect();
        assert_eq!(values, vec!["2", "1"]);
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let h = history();
        h.record(search("1", Some(5), 1.0)).unwrap();
        h.record(search("2", None, 2.0)).unwrap();
        h.record(search("3", None, 3.0)).unwrap();

        let entries = h.record(search("1", Some(5), 4.0)).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].filter_value, "1");
        assert_eq!(entries[0].timestamp, 4.0);
    }

    #[test]
    fn test_different_threshold_is_a_different_search() {
        let h = history();
        h.record(search("1", Some(5), 1.0)).unwrap();
        h.record(search("1", Some(6), 2.0)).unwrap();
        assert_eq!(h.list().len(), 2);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let h = history();
        for i in 0..HISTORY_LIMIT {
            h.record(search(&i.to_string(), None, i as f64)).unwrap();
        }
        h.record(search("new", None, 99.0)).unwrap();

        let entries = h.list();
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].filter_value, "new");
        assert!(entries.iter().all(|e| e.filter_value != "0"));
    }

    #[test]
    fn test_load_and_clear() {
        let h = history();
        h.record(search("1", None, 1.0)).unwrap();

        assert_eq!(h.load(0).unwrap().filter_value, "1");
        assert_eq!(h.load(3), Err(HistoryError::NotFound(3)));

        h.clear().unwrap();
        assert!(h.list().is_empty());
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let store = MemoryStore::default();
        store.set(HISTORY_KEY, "not json").unwrap();
        assert!(SearchHistory::new(store).list().is_empty());
    }

    #[test]
    fn test_summary() {
        let mut entry = search("42", Some(5), 0.0);
        entry.label = "Wholesale".to_string();
        entry.category_id = Some(11);
        entry.category_label = Some("— Shirts".to_string());
        assert_eq!(entry.summary(), "Wholesale in Shirts (stock < 5)");
        assert_eq!(entry.params().product_category, Some(11));
    }
}
