//! Key-value backed history repository.
//!
//! The whole history lives under one key as a JSON array, newest first.
//! Every mutation reads, rewrites and stores the full collection. Store calls
//! run on the blocking pool since file-backed stores do synchronous I/O.

use std::sync::Arc;

use harzo_core::history::{HISTORY_CAPACITY, HISTORY_STORAGE_KEY};
use harzo_core::{HarzoError, HistoryEntry, HistoryRepository, KeyValueStore, Result};
use tokio::sync::Mutex;
use tokio::task;

/// [`HistoryRepository`] over any [`KeyValueStore`].
pub struct KeyValueHistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    /// Serializes read-modify-write cycles issued through this handle
    write_lock: Mutex<()>,
}

impl KeyValueHistoryStore {
    /// Creates a store under the default key with the default capacity.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: HISTORY_STORAGE_KEY.to_string(),
            capacity: HISTORY_CAPACITY,
            write_lock: Mutex::new(()),
        }
    }

    /// Overrides the namespace key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Runs `f` against the backing store on the blocking pool.
    async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn KeyValueStore, &str) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        let key = self.key.clone();

        task::spawn_blocking(move || f(store.as_ref(), &key))
            .await
            .map_err(|e| HarzoError::io(format!("Failed to spawn blocking task: {}", e)))?
    }
}

/// Reads the persisted collection, treating any failure as empty.
fn read_entries(store: &dyn KeyValueStore, key: &str) -> Vec<HistoryEntry> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("[HistoryStore] Failed to read history, using empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("[HistoryStore] Discarding unreadable history payload: {}", e);
            Vec::new()
        }
    }
}

fn write_entries(store: &dyn KeyValueStore, key: &str, entries: &[HistoryEntry]) -> Result<()> {
    let payload = serde_json::to_string(entries)?;
    store.set(key, &payload)
}

#[async_trait::async_trait]
impl HistoryRepository for KeyValueHistoryStore {
    async fn list(&self) -> Vec<HistoryEntry> {
        self.with_store(|store, key| Ok(read_entries(store, key)))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("[HistoryStore] Failed to read history, using empty: {}", e);
                Vec::new()
            })
    }

    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let capacity = self.capacity;

        self.with_store(move |store, key| {
            let mut entries = read_entries(store, key);
            entries.insert(0, entry);
            if entries.len() > capacity {
                let evicted = entries.len() - capacity;
                entries.truncate(capacity);
                tracing::debug!("[HistoryStore] Evicted {} oldest entries", evicted);
            }
            write_entries(store, key, &entries)
        })
        .await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let id = id.to_string();

        self.with_store(move |store, key| {
            let mut entries = read_entries(store, key);
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() == before {
                tracing::debug!("[HistoryStore] No entry with id {} to remove", id);
            }
            write_entries(store, key, &entries)
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.with_store(|store, key| store.remove(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use harzo_core::{GenerationSettings, ImageHandle, Mode};

    fn entry(n: i64) -> HistoryEntry {
        HistoryEntry::new(
            n.to_string(),
            ImageHandle::new(format!("img{n}")),
            format!("prompt {n}"),
            GenerationSettings::default(),
            n,
            Mode::Create,
        )
    }

    fn store() -> (Arc<InMemoryKeyValueStore>, KeyValueHistoryStore) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let history = KeyValueHistoryStore::new(kv.clone());
        (kv, history)
    }

    #[tokio::test]
    async fn test_list_is_empty_without_data() {
        let (_, history) = store();
        assert!(history.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_is_newest_first() {
        let (_, history) = store();
        history.append(entry(1)).await.unwrap();
        history.append(entry(2)).await.unwrap();
        history.append(entry(3)).await.unwrap();

        let ids: Vec<_> = history.list().await.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[tokio::test]
    async fn test_fifty_first_append_evicts_oldest() {
        let (_, history) = store();
        for n in 1..=HISTORY_CAPACITY as i64 {
            history.append(entry(n)).await.unwrap();
        }
        assert_eq!(history.list().await.len(), HISTORY_CAPACITY);

        history.append(entry(51)).await.unwrap();

        let entries = history.list().await;
        assert_eq!(entries.len(), HISTORY_CAPACITY);
        assert_eq!(entries.first().unwrap().id, "51");
        assert_eq!(entries.last().unwrap().id, "2");
        assert!(entries.iter().all(|e| e.id != "1"));
    }

    #[tokio::test]
    async fn test_remove_absent_id_leaves_collection_unchanged() {
        let (_, history) = store();
        history.append(entry(1)).await.unwrap();
        history.append(entry(2)).await.unwrap();
        let before = history.list().await;

        history.remove("does-not-exist").await.unwrap();

        assert_eq!(history.list().await, before);
    }

    #[tokio::test]
    async fn test_remove_filters_matching_id() {
        let (_, history) = store();
        history.append(entry(1)).await.unwrap();
        history.append(entry(2)).await.unwrap();

        history.remove("1").await.unwrap();

        let entries = history.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "2");
        assert!(history.get("1").await.is_none());
        assert!(history.get("2").await.is_some());
    }

    #[tokio::test]
    async fn test_clear_removes_the_key() {
        let (kv, history) = store();
        history.append(entry(1)).await.unwrap();

        history.clear().await.unwrap();

        assert!(history.list().await.is_empty());
        assert_eq!(kv.get(HISTORY_STORAGE_KEY).unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_appends_are_all_kept() {
        let (_, history) = store();
        let history = Arc::new(history);

        let handles: Vec<_> = (1..=10)
            .map(|n| {
                let history = history.clone();
                tokio::spawn(async move { history.append(entry(n)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut ids: Vec<i64> = history
            .list()
            .await
            .into_iter()
            .map(|e| e.id.parse().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_corrupt_payload_reads_as_empty_and_recovers() {
        let (kv, history) = store();
        kv.set(HISTORY_STORAGE_KEY, "{not valid json").unwrap();

        assert!(history.list().await.is_empty());

        history.append(entry(7)).await.unwrap();
        let entries = history.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "7");
    }

    #[tokio::test]
    async fn test_append_round_trips_all_fields() {
        let (_, history) = store();
        let original = HistoryEntry::new(
            "42",
            ImageHandle::from_base64("image/png", "QUJD"),
            "a red fox in snow",
            GenerationSettings {
                lighting: None,
                negative_prompt: "blurry".to_string(),
                ..GenerationSettings::default().with_custom_size(640, 480)
            },
            42,
            Mode::Persona,
        )
        .with_persona_style("knight");

        history.append(original.clone()).await.unwrap();

        assert_eq!(history.list().await, vec![original]);
    }

    #[tokio::test]
    async fn test_custom_key_is_isolated() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let a = KeyValueHistoryStore::new(kv.clone());
        let b = KeyValueHistoryStore::new(kv.clone()).with_key("other_history");

        a.append(entry(1)).await.unwrap();

        assert_eq!(a.list().await.len(), 1);
        assert!(b.list().await.is_empty());
    }
}
