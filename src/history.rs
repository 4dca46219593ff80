use uuid::Uuid;

use crate::error::StorageError;
use crate::models::CalculationResult;
use crate::storage::Storage;

pub const HISTORY_CAPACITY: usize = 50;

pub const DEFAULT_HISTORY_KEY: &str = "cgpaHistory";

pub struct HistoryStore<S: Storage> {
    storage: S,
    key: String,
    entries: Vec<CalculationResult>,
}

impl<S: Storage> HistoryStore<S> {
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_HISTORY_KEY)
    }

    /// Load the log stored under `key`.
    ///
    /// Unreadable or corrupt state is logged and treated as an empty log.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = load_entries(&storage, &key);
        tracing::debug!(key = %key, entries = entries.len(), "history loaded");
        Self {
            storage,
            key,
            entries,
        }
    }

    pub fn list(&self) -> &[CalculationResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&CalculationResult> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn append(&mut self, result: CalculationResult) -> Result<(), StorageError> {
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(result);
        next.extend(self.entries.iter().cloned());
        if next.len() > HISTORY_CAPACITY {
            let evicted = next.len() - HISTORY_CAPACITY;
            next.truncate(HISTORY_CAPACITY);
            tracing::info!(evicted, "history full, dropped oldest calculations");
        }
        self.replace(next)
    }

    /// `Ok(None)` means there was no such entry and nothing was written.
    pub fn delete_by_id(&mut self, id: Uuid) -> Result<Option<CalculationResult>, StorageError> {
        let Some(position) = self.entries.iter().position(|entry| entry.id() == id) else {
            return Ok(None);
        };
        let mut next = self.entries.clone();
        let removed = next.remove(position);
        self.replace(next)?;
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        self.entries.clear();
        tracing::debug!(key = %self.key, "history cleared");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // The in-memory log only changes once the write has succeeded.
    fn replace(&mut self, next: Vec<CalculationResult>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&next)?;
        self.storage.set(&self.key, &json)?;
        self.entries = next;
        tracing::debug!(key = %self.key, entries = self.entries.len(), "history persisted");
        Ok(())
    }
}

fn load_entries<S: Storage>(storage: &S, key: &str) -> Vec<CalculationResult> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key, "failed to read history: {err}. Starting empty.");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CalculationResult>>(&raw) {
        Ok(mut entries) => {
            entries.truncate(HISTORY_CAPACITY);
            entries
        }
        Err(err) => {
            tracing::warn!(key, "stored history is corrupt: {err}. Starting empty.");
            Vec::new()
        }
    }
}
